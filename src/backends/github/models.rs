//! Subset of the GitHub webhook payloads read by the normalizer.
//!
//! Every field is optional: absent values, and values of an unexpected type,
//! fall back to defaults during normalization instead of rejecting the
//! delivery.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PushEvent {
    #[serde(rename = "ref", deserialize_with = "lenient")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub head_commit: Option<Commit>,
    #[serde(deserialize_with = "lenient")]
    pub pusher: Option<CommitUser>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CommitUser {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PullRequestEvent {
    #[serde(deserialize_with = "lenient")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub merged: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub user: Option<User>,
    #[serde(deserialize_with = "lenient")]
    pub head: Option<BranchRef>,
    #[serde(deserialize_with = "lenient")]
    pub base: Option<BranchRef>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "lenient")]
    pub login: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BranchRef {
    #[serde(rename = "ref", deserialize_with = "lenient")]
    pub reference: Option<String>,
}

/// Any JSON value is accepted; one that does not fit `T` reads as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl PushEvent {
    pub fn pusher_name(&self) -> Option<&str> {
        self.pusher.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Last segment of the pushed ref (`refs/heads/main` gives `main`).
    pub fn branch_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.rsplit('/').next())
    }

    pub fn head_commit_id(&self) -> Option<&str> {
        self.head_commit.as_ref().and_then(|c| c.id.as_deref())
    }

    pub fn head_commit_timestamp(&self) -> Option<&str> {
        self.head_commit.as_ref().and_then(|c| c.timestamp.as_deref())
    }
}

impl PullRequest {
    pub fn author_login(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.login.as_deref())
    }

    pub fn head_ref(&self) -> Option<&str> {
        self.head.as_ref().and_then(|b| b.reference.as_deref())
    }

    pub fn base_ref(&self) -> Option<&str> {
        self.base.as_ref().and_then(|b| b.reference.as_deref())
    }

    /// Only a JSON `true` counts; `"true"`, `1` and `null` do not.
    pub fn is_merged(&self) -> bool {
        self.merged == Some(true)
    }
}
