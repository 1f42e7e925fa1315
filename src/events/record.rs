use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{format_human_timestamp, format_storage_timestamp, EventAction};

/// Normalized GitHub activity, as stored and as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    pub from_branch: String,
    pub to_branch: String,
    pub timestamp: String,
    pub formatted_message: String,
}

impl WebhookEvent {
    /// Render both timestamp forms and the summary message from the event time.
    pub fn new(
        action: EventAction,
        request_id: impl Into<String>,
        author: impl Into<String>,
        from_branch: impl Into<String>,
        to_branch: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        let author = author.into();
        let from_branch = from_branch.into();
        let to_branch = to_branch.into();
        let formatted_message = action.describe(
            &author,
            &from_branch,
            &to_branch,
            &format_human_timestamp(&occurred_at),
        );

        Self {
            request_id: request_id.into(),
            author,
            action,
            from_branch,
            to_branch,
            timestamp: format_storage_timestamp(&occurred_at),
            formatted_message,
        }
    }
}
