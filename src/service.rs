use std::sync::Arc;

use crate::{
    config::Config,
    store::{EventStore, MemoryEventStore, SqliteEventStore, StoreError},
};

#[derive(Debug, Clone)]
pub struct ServiceHandler {
    event_store: Arc<dyn EventStore>,
}

impl ServiceHandler {
    pub fn new(event_store: Arc<dyn EventStore>) -> Self {
        Self { event_store }
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let event_store: Arc<dyn EventStore> = match config.database_path() {
            Some(path) => {
                tracing::info!(path = path, "using SQLite event store");
                Arc::new(SqliteEventStore::new(path)?)
            }
            None => {
                tracing::warn!("no database path configured, events will be kept in memory");
                Arc::new(MemoryEventStore::new())
            }
        };

        Ok(Self::new(event_store))
    }

    pub fn store(&self) -> &dyn EventStore {
        self.event_store.as_ref()
    }
}
