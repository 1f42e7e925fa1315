use serde::Serialize;

pub const APP_NAME: &str = "hooklog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Payload of the root endpoint, used as a health check.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ServerInfo {
    message: String,
    version: String,
    storage: String,
}

impl ServerInfo {
    pub fn new<T: Into<String>>(storage: T) -> Self {
        Self {
            message: format!("{}, listening for GitHub events!", APP_NAME),
            version: APP_VERSION.into(),
            storage: storage.into(),
        }
    }
}
