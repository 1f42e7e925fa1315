use pretty_assertions::assert_eq;

use crate::events::EventAction;

use super::{normalize, EventFamily, GitHubEvent};

fn parse_sample(family: EventFamily, sample: &str) -> GitHubEvent {
    GitHubEvent::parse(family, sample).expect("should deserialize")
}

#[test]
fn test_normalize_push_sample() {
    let event = parse_sample(EventFamily::Push, include_str!("./push_sample.json"));
    let record = normalize(&event).unwrap().expect("should be recorded");

    assert_eq!(record.action, EventAction::Push);
    assert_eq!(record.request_id, "5d0ce0ef3a1a2b2f5c6c1a3c4a8e1b7f0d9e2c11");
    assert_eq!(
        record.formatted_message,
        r#""alice" pushed to "main" on 1st April 2021 - 09:30 PM UTC"#
    );
}

#[test]
fn test_normalize_pull_request_opened_sample() {
    let event = parse_sample(
        EventFamily::PullRequest,
        include_str!("./pull_request_opened_sample.json"),
    );
    let record = normalize(&event).unwrap().expect("should be recorded");

    assert_eq!(record.action, EventAction::PullRequest);
    assert_eq!(record.request_id, "279147437");
    assert_eq!(record.timestamp, "2021-04-22 14:05:11 UTC");
    assert_eq!(
        record.formatted_message,
        r#""bob" submitted a pull request from "changes" to "main" on 22nd April 2021 - 02:05 PM UTC"#
    );
}

#[test]
fn test_normalize_pull_request_merged_sample() {
    let event = parse_sample(
        EventFamily::PullRequest,
        include_str!("./pull_request_merged_sample.json"),
    );
    let record = normalize(&event).unwrap().expect("should be recorded");

    assert_eq!(record.action, EventAction::Merge);
    assert_eq!(record.author, "bob");
    assert_eq!(record.from_branch, "changes");
    assert_eq!(record.to_branch, "main");
    assert_eq!(record.timestamp, "2021-04-23 06:12:45 UTC");
    assert_eq!(
        record.formatted_message,
        r#""bob" merged branch "changes" to "main" on 23rd April 2021 - 06:12 AM UTC"#
    );
}
