//! process configuration, read once at startup from the environment
//!
//! Settings are loaded in `main` and passed down by reference so the
//! dispatcher can be constructed against arbitrary values in tests.

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use url::Url;

use crate::message;

/// complete configuration surface of the forwarder
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// destination chat webhook, from `WEBHOOK_URL` (required)
    pub webhook_url: Url,
    /// attachment title, from `ATTACHMENT_TITLE`
    pub attachment_title: String,
    /// log level, from `LOG_LEVEL`
    pub log_level: String,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// Fails if `WEBHOOK_URL` is unset or not a valid URL.
    pub fn load() -> Result<Self> {
        let conf = Config::builder()
            .set_default("attachment_title", message::DEFAULT_TITLE)?
            .set_default("log_level", "info")?
            .add_source(Environment::default())
            .build()
            .context("can't read configuration from environment")?;

        conf.try_deserialize()
            .context("invalid configuration, WEBHOOK_URL must be set to a valid url")
    }
}
