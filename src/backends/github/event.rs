use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use strum::{Display, EnumString};

use super::{PullRequestEvent, PushEvent};

pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";

/// Event families handled by the receiver, keyed by the `X-GitHub-Event` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum EventFamily {
    Push,
    PullRequest,
}

impl EventFamily {
    /// `None` for every tag this service does not record.
    pub fn from_header(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

#[derive(Debug, Clone)]
pub enum GitHubEvent {
    Push(PushEvent),
    PullRequest(PullRequestEvent),
}

impl GitHubEvent {
    pub fn parse(family: EventFamily, body: &str) -> Result<Self, serde_json::Error> {
        Ok(match family {
            EventFamily::Push => Self::Push(parse_body(body)?),
            EventFamily::PullRequest => Self::PullRequest(parse_body(body)?),
        })
    }

    pub fn family(&self) -> EventFamily {
        match self {
            Self::Push(_) => EventFamily::Push,
            Self::PullRequest(_) => EventFamily::PullRequest,
        }
    }
}

/// The payload models tolerate odd field types, so only the top-level shape is checked here.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("expected a JSON object"));
    }

    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::{EventFamily, GitHubEvent};

    #[test]
    fn test_event_family_from_header() {
        assert_eq!(EventFamily::from_header("push"), Some(EventFamily::Push));
        assert_eq!(
            EventFamily::from_header("pull_request"),
            Some(EventFamily::PullRequest)
        );
        assert_eq!(EventFamily::from_header("issues"), None);
        assert_eq!(EventFamily::from_header("ping"), None);
        assert_eq!(EventFamily::from_header("Push"), None);
        assert_eq!(EventFamily::from_header(""), None);
    }

    #[test]
    fn test_parse_dispatches_on_family() {
        let event = GitHubEvent::parse(EventFamily::Push, r#"{"ref": "refs/heads/main"}"#).unwrap();
        assert_matches!(&event, GitHubEvent::Push(p) if p.branch_name() == Some("main"));
        assert_eq!(event.family(), EventFamily::Push);

        let event = GitHubEvent::parse(EventFamily::PullRequest, r#"{"action": "opened"}"#).unwrap();
        assert_matches!(event, GitHubEvent::PullRequest(p) if p.action.as_deref() == Some("opened"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(GitHubEvent::parse(EventFamily::Push, "").is_err());
        assert!(GitHubEvent::parse(EventFamily::Push, "{").is_err());

        for body in ["[1, 2]", "null", "12", r#""push""#] {
            let err = GitHubEvent::parse(EventFamily::PullRequest, body).unwrap_err();
            assert_eq!(err.to_string(), "expected a JSON object", "body {}", body);
        }
    }

    #[test]
    fn test_parse_accepts_wrong_field_types() {
        let event = GitHubEvent::parse(EventFamily::PullRequest, r#"{"action": 12}"#).unwrap();
        assert_matches!(event, GitHubEvent::PullRequest(p) if p.action.is_none());

        let event = GitHubEvent::parse(
            EventFamily::PullRequest,
            r#"{"action": "closed", "pull_request": {"merged": "true"}}"#,
        )
        .unwrap();
        assert_matches!(
            event,
            GitHubEvent::PullRequest(p)
                if p.pull_request.as_ref().map(|pr| pr.is_merged()) == Some(false)
        );
    }
}
