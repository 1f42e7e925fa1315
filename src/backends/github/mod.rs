mod event;
mod http;
mod models;
mod normalizer;

#[cfg(test)]
mod tests;

pub use event::*;
pub use http::*;
pub use models::*;
pub use normalizer::*;
