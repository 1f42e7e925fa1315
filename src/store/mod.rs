mod error;
mod memory;
mod sqlite;

use std::any::Any;

use async_trait::async_trait;

use crate::events::WebhookEvent;

pub use self::error::StoreError;
pub use self::memory::MemoryEventStore;
pub use self::sqlite::SqliteEventStore;

/// Number of events served by the polling endpoint.
pub const DEFAULT_LATEST_LIMIT: usize = 10;

/// Append-only event log.
///
/// Ordering is defined by insertion, never by the event timestamp.
#[async_trait]
pub trait EventStore: std::fmt::Debug + Send + Sync {
    /// Append one event. Duplicate deliveries are stored twice.
    async fn insert(&self, event: WebhookEvent) -> Result<(), StoreError>;

    /// Return up to `limit` events, most recently inserted first.
    async fn latest(&self, limit: usize) -> Result<Vec<WebhookEvent>, StoreError>;

    /// Short backend name, reported by the health check.
    fn backend_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}
