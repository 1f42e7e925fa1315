use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Classification of a stored webhook event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Push,
    PullRequest,
    Merge,
}

impl EventAction {
    /// Build the one-line summary shown on the dashboard.
    pub fn describe(&self, author: &str, from_branch: &str, to_branch: &str, date: &str) -> String {
        match self {
            Self::Push => format!(r#""{author}" pushed to "{to_branch}" on {date}"#),
            Self::PullRequest => format!(
                r#""{author}" submitted a pull request from "{from_branch}" to "{to_branch}" on {date}"#
            ),
            Self::Merge => {
                format!(r#""{author}" merged branch "{from_branch}" to "{to_branch}" on {date}"#)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::EventAction;

    #[test]
    fn test_action_names() {
        assert_eq!(EventAction::Push.as_ref(), "PUSH");
        assert_eq!(EventAction::PullRequest.as_ref(), "PULL_REQUEST");
        assert_eq!(EventAction::Merge.to_string(), "MERGE");
        assert_eq!(
            EventAction::from_str("PULL_REQUEST").unwrap(),
            EventAction::PullRequest
        );
        assert!(EventAction::from_str("pull_request").is_err());
    }

    #[test]
    fn test_action_serialization() {
        assert_eq!(
            serde_json::to_string(&EventAction::PullRequest).unwrap(),
            r#""PULL_REQUEST""#
        );
        assert_eq!(
            serde_json::from_str::<EventAction>(r#""MERGE""#).unwrap(),
            EventAction::Merge
        );
    }

    #[test]
    fn test_describe() {
        let date = "1st April 2021 - 09:30 PM UTC";

        assert_eq!(
            EventAction::Push.describe("alice", "", "main", date),
            r#""alice" pushed to "main" on 1st April 2021 - 09:30 PM UTC"#
        );
        assert_eq!(
            EventAction::PullRequest.describe("bob", "feature", "dev", date),
            r#""bob" submitted a pull request from "feature" to "dev" on 1st April 2021 - 09:30 PM UTC"#
        );
        assert_eq!(
            EventAction::Merge.describe("carol", "staging", "master", date),
            r#""carol" merged branch "staging" to "master" on 1st April 2021 - 09:30 PM UTC"#
        );
    }
}
