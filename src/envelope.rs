//! data structures for deserializing incoming alarm notifications
//!
//! The envelope is the SNS-style wrapper the event delivery mechanism hands
//! us: a list of records, each carrying the actual alarm payload as a
//! JSON-encoded string in its `Message` field (double-encoded JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// outer notification wrapper delivered by the triggering pub/sub mechanism
///
/// only `records[0].sns.message` is ever consumed
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
#[allow(clippy::missing_docs_in_private_items)]
struct Record {
    sns: Notification,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
#[allow(clippy::missing_docs_in_private_items)]
struct Notification {
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    /// JSON-encoded [AlarmEvent]
    message: String,
}

/// alarm state transition decoded from the inner message string
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmEvent {
    #[serde(default)]
    pub alarm_name: String,
    #[serde(default)]
    pub new_state_value: String,
    #[serde(default)]
    pub new_state_reason: String,
}

/// Error occuring when extracting an [AlarmEvent] from an [Envelope]
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// the records list was empty, there is nothing to forward
    #[error("envelope contains no notification records")]
    Empty,
    /// the inner message string was not valid json
    #[error("notification message is not valid json")]
    MalformedMessage {
        /// the raw message string, kept so the caller can log it
        raw: String,
        /// the underlying deserialization error
        source: serde_json::Error,
    },
}

impl Envelope {
    /// Decodes the first record's inner message string into an [AlarmEvent].
    ///
    /// Returns [EnvelopeError::Empty] if there is no first record and
    /// [EnvelopeError::MalformedMessage] if the inner string is not valid
    /// JSON. The caller decides whether to continue with a zero-valued
    /// event; this function never does so silently.
    pub fn alarm_event(&self) -> Result<AlarmEvent, EnvelopeError> {
        let record = self.records.first().ok_or(EnvelopeError::Empty)?;
        let raw = record.sns.message.as_str();

        serde_json::from_str(raw).map_err(|source| EnvelopeError::MalformedMessage {
            raw: raw.to_owned(),
            source,
        })
    }
}
