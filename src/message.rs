//! Builds the outgoing chat message from an alarm state transition.
//!
//! The wire format is the classic Slack incoming-webhook payload: a top
//! level `text` plus a single attachment carrying the state reason and a
//! color accent derived from the alarm state.

use serde::{Deserialize, Serialize};

/// attachment title used when none is configured
///
/// legacy label kept for compatibility with existing channels; override via
/// the `ATTACHMENT_TITLE` setting
pub const DEFAULT_TITLE: &str = "Elastic Beanstalk notification";

/// outgoing webhook payload
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// the alarm name
    pub text: String,
    /// always exactly one attachment
    pub attachments: Vec<Attachment>,
}

/// styled sub-block of a [ChatMessage]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Attachment {
    /// state reason wrapped in inline-code markup
    pub text: String,
    /// one of "good", "danger" or "warning"
    pub color: String,
    /// configured attachment title
    pub title: String,
}

/// Maps an alarm state to a presentation color.
///
/// Case-sensitive on purpose: the monitoring backend emits the state tokens
/// verbatim and anything unknown (including the empty string of a degraded
/// event) renders as a warning.
pub fn color_for(state: &str) -> &'static str {
    match state {
        "OK" => "good",
        "ALARM" => "danger",
        _ => "warning",
    }
}

/// Builds the chat message for an alarm state transition.
///
/// Total over its inputs, no error conditions. The reason is wrapped in
/// single backticks without escaping, so an empty reason renders as "``".
pub fn build_message(state: &str, alarm_name: &str, reason: &str, title: &str) -> ChatMessage {
    ChatMessage {
        text: alarm_name.to_owned(),
        attachments: vec![Attachment {
            text: format!("`{reason}`"),
            color: color_for(state).to_owned(),
            title: title.to_owned(),
        }],
    }
}
