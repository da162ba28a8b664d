//! delivers rendered chat messages to the configured webhook endpoint

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::{message::ChatMessage, settings::Settings};

/// Error occuring when posting a [ChatMessage] to the webhook
#[derive(Error, Debug)]
pub enum DispatchError {
    /// serialization or network failure during the POST
    #[error("failed to post webhook message")]
    Request(#[from] reqwest::Error),
    /// the endpoint answered, but not with 200
    #[error("webhook endpoint answered with status {status}")]
    Status {
        /// the observed response status
        status: StatusCode,
    },
}

/// posts messages to a fixed webhook url
///
/// Holds the client and destination injected at construction; nothing is
/// looked up from the environment at dispatch time.
pub struct WebhookDispatcher {
    client: Client,
    url: Url,
}

impl WebhookDispatcher {
    /// construct a dispatcher for the configured webhook
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            url: settings.webhook_url.clone(),
        }
    }

    /// Serializes the message and POSTs it as json.
    ///
    /// Only a response status of exactly 200 counts as delivered. The
    /// response body is dropped on every path. No retries at any layer.
    pub async fn dispatch(&self, message: &ChatMessage) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DispatchError::Status { status });
        }

        Ok(())
    }
}
