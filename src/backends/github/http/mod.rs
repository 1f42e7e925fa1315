pub mod middleware;

use axum::{extract::Extension, http::HeaderMap, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::ErrorCode,
    events::WebhookEvent,
    service::ServiceHandler,
    store::DEFAULT_LATEST_LIMIT,
};

use super::{normalize, EventFamily, GitHubEvent, GITHUB_EVENT_HEADER};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Acknowledgement {
    message: &'static str,
}

impl Acknowledgement {
    pub fn stored() -> Self {
        Self {
            message: "Event stored",
        }
    }

    pub fn ignored() -> Self {
        Self {
            message: "Event ignored",
        }
    }
}

fn pretty_print_json(s: &str) -> String {
    serde_json::from_str::<Value>(s)
        .and_then(|n| serde_json::to_string_pretty(&n))
        .unwrap_or_default()
}

#[tracing::instrument(skip(services, body), fields(body_pretty = %pretty_print_json(&body)))]
pub async fn webhook(
    headers: HeaderMap,
    services: Extension<ServiceHandler>,
    body: String,
) -> Result<Json<Acknowledgement>, ErrorCode> {
    let tag = headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let family = match EventFamily::from_header(tag) {
        Some(family) => family,
        None => {
            tracing::debug!(event = tag, "ignoring unsupported event");
            return Ok(Json(Acknowledgement::ignored()));
        }
    };

    let event = GitHubEvent::parse(family, &body).map_err(ErrorCode::MalformedEventBody)?;
    handle_event(&services, event).await.map(Json)
}

#[tracing::instrument(skip(services))]
async fn handle_event(
    services: &ServiceHandler,
    event: GitHubEvent,
) -> Result<Acknowledgement, ErrorCode> {
    match normalize(&event)? {
        Some(record) => {
            tracing::info!(
                action = %record.action,
                request_id = %record.request_id,
                author = %record.author,
                "storing event"
            );
            services.store().insert(record).await?;
            Ok(Acknowledgement::stored())
        }
        None => {
            tracing::debug!(family = %event.family(), "ignoring non-actionable event");
            Ok(Acknowledgement::ignored())
        }
    }
}

#[tracing::instrument(skip(services))]
pub async fn latest_events(
    services: Extension<ServiceHandler>,
) -> Result<Json<Vec<WebhookEvent>>, ErrorCode> {
    let events = services.store().latest(DEFAULT_LATEST_LIMIT).await?;
    Ok(Json(events))
}
