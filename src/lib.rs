pub mod backends;
pub mod cmdargs;
pub mod config;
pub mod crypto;
pub mod error;
pub mod events;
pub mod http;
pub mod logging;
pub mod server_info;
pub mod service;
pub mod store;
