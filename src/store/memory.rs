use std::{any::Any, sync::RwLock};

use async_trait::async_trait;

use crate::events::WebhookEvent;

use super::{EventStore, StoreError};

/// Process-local store, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<WebhookEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    #[tracing::instrument(skip(self))]
    async fn insert(&self, event: WebhookEvent) -> Result<(), StoreError> {
        self.events
            .write()
            .map_err(|e| StoreError::backend("insert", e))?
            .push(event);

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn latest(&self, limit: usize) -> Result<Vec<WebhookEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|e| StoreError::backend("latest", e))?;

        Ok(events.iter().rev().take(limit).cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
