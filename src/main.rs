//! forwards cloud monitoring alarm notifications into a chat webhook
//!
//! Invoked once per event by an external delivery mechanism: the complete
//! envelope arrives on stdin, gets decoded, rendered into a Slack-style
//! message and POSTed to the configured webhook url. Stateless, no retries,
//! failures past the envelope parse are logged and swallowed.

use std::io::Read;

use anyhow::{Context, Result};

use crate::{envelope::Envelope, handler::Notifier, settings::Settings};

mod envelope;
mod handler;
mod log;
mod message;
mod settings;
mod webhook;

/// the entry point of the program
#[tokio::main]
pub async fn main() -> Result<()> {
    let settings = Settings::load().context("could not load settings")?;

    log::setup_logging(&settings).context("could not setup logging")?;

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("could not read invocation payload")?;

    let envelope: Envelope =
        serde_json::from_str(&raw).context("invocation payload is not a notification envelope")?;

    Notifier::new(&settings).handle(envelope).await;

    Ok(())
}
