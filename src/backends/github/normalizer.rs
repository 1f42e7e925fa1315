use std::str::FromStr;

use chrono::{DateTime, Utc};
use strum::EnumString;
use thiserror::Error;

use crate::events::{parse_timestamp, EventAction, WebhookEvent};

use super::{GitHubEvent, PullRequestEvent, PushEvent};

const UNKNOWN_AUTHOR: &str = "Unknown";
const UNKNOWN_COMMIT: &str = "unknown_hash";
const UNKNOWN_PULL_REQUEST: &str = "unknown_id";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Missing event body field '{0}'")]
    MissingField(&'static str),
    #[error("Malformed event body field '{0}': '{1}'")]
    MalformedField(&'static str, String),
}

#[derive(Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
enum PullRequestAction {
    Opened,
    Reopened,
    Synchronize,
    Closed,
}

/// Convert a GitHub delivery into a stored event.
///
/// `Ok(None)` means the delivery is valid but not worth recording.
pub fn normalize(event: &GitHubEvent) -> Result<Option<WebhookEvent>, NormalizeError> {
    match event {
        GitHubEvent::Push(push) => normalize_push(push).map(Some),
        GitHubEvent::PullRequest(pull_request) => normalize_pull_request(pull_request),
    }
}

fn normalize_push(event: &PushEvent) -> Result<WebhookEvent, NormalizeError> {
    let occurred_at = required_timestamp("head_commit.timestamp", event.head_commit_timestamp())?;

    Ok(WebhookEvent::new(
        EventAction::Push,
        event.head_commit_id().unwrap_or(UNKNOWN_COMMIT),
        event.pusher_name().unwrap_or(UNKNOWN_AUTHOR),
        "",
        event.branch_name().unwrap_or_default(),
        occurred_at,
    ))
}

fn normalize_pull_request(
    event: &PullRequestEvent,
) -> Result<Option<WebhookEvent>, NormalizeError> {
    let pull_request = event.pull_request.clone().unwrap_or_default();
    let pr_action = event
        .action
        .as_deref()
        .and_then(|a| PullRequestAction::from_str(a).ok());

    let action = match pr_action {
        Some(PullRequestAction::Closed) if pull_request.is_merged() => EventAction::Merge,
        Some(
            PullRequestAction::Opened | PullRequestAction::Reopened | PullRequestAction::Synchronize,
        ) => EventAction::PullRequest,
        Some(PullRequestAction::Closed) | None => return Ok(None),
    };

    let occurred_at =
        required_timestamp("pull_request.updated_at", pull_request.updated_at.as_deref())?;
    let request_id = pull_request
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_PULL_REQUEST.into());

    Ok(Some(WebhookEvent::new(
        action,
        request_id,
        pull_request.author_login().unwrap_or(UNKNOWN_AUTHOR),
        pull_request.head_ref().unwrap_or_default(),
        pull_request.base_ref().unwrap_or_default(),
        occurred_at,
    )))
}

fn required_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<DateTime<Utc>, NormalizeError> {
    let value = value.ok_or(NormalizeError::MissingField(field))?;
    parse_timestamp(value).map_err(|e| NormalizeError::MalformedField(field, e.to_string()))
}
