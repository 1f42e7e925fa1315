mod action;
mod datetime;
mod record;

pub use self::action::EventAction;
pub use self::datetime::{
    format_human_timestamp, format_storage_timestamp, ordinal_suffix, parse_timestamp,
    TimestampError,
};
pub use self::record::WebhookEvent;
