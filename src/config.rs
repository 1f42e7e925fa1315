use std::{net::SocketAddr, str::FromStr};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Malformed bind IP: '{0}'. Make sure you entered a valid IP.")]
    MalformedBindIp(String),
    #[error("Empty database path. Unset it to keep events in memory.")]
    EmptyDatabasePath,
    #[error("Missing database path. Set HL_DATABASE_PATH or --database-path to read stored events.")]
    MissingDatabasePath,
}

#[derive(Debug, Clone)]
pub struct Config {
    telemetry_url: Option<String>,
    webhook_secret: Option<String>,
    database_path: Option<String>,
    bind_ip: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            telemetry_url: env_to_str("HL_TELEMETRY_URL"),
            webhook_secret: env_to_str("HL_WEBHOOK_SECRET"),
            database_path: env_to_str("HL_DATABASE_PATH"),
            bind_ip: env_to_str("HL_BIND_IP").unwrap_or_else(|| "127.0.0.1:3000".into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            telemetry_url: None,
            webhook_secret: None,
            database_path: None,
            bind_ip: "".into(),
        }
    }

    pub fn telemetry_url(&self) -> Option<&str> {
        self.telemetry_url.as_deref()
    }

    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret.as_deref()
    }

    /// SQLite database file; events stay in memory when unset.
    pub fn database_path(&self) -> Option<&str> {
        self.database_path.as_deref()
    }

    /// For commands that read back persisted events, which an in-memory store never has.
    pub fn require_database_path(&self) -> Result<&str, ConfigError> {
        self.database_path().ok_or(ConfigError::MissingDatabasePath)
    }

    pub fn bind_ip(&self) -> &str {
        &self.bind_ip
    }

    pub fn set_telemetry_url<T: Into<String>>(&mut self, value: T) {
        self.telemetry_url = Some(value.into());
    }

    pub fn set_webhook_secret<T: Into<String>>(&mut self, value: T) {
        self.webhook_secret = Some(value.into());
    }

    pub fn set_database_path<T: Into<String>>(&mut self, value: T) {
        self.database_path = Some(value.into());
    }

    pub fn set_bind_ip<T: Into<String>>(&mut self, value: T) {
        self.bind_ip = value.into();
    }

    pub fn validate_configuration(&self) -> Result<(), ConfigError> {
        if self.database_path.as_deref().map(str::trim) == Some("") {
            return Err(ConfigError::EmptyDatabasePath);
        }

        let _ = SocketAddr::from_str(&self.bind_ip)
            .map_err(|_| ConfigError::MalformedBindIp(self.bind_ip.clone()))?;

        Ok(())
    }
}

fn env_to_str(env_key: &str) -> Option<String> {
    std::env::var(env_key).ok().filter(|s| !s.is_empty())
}
