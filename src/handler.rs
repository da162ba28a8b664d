//! Orchestrates one invocation: decode the envelope, build the chat
//! message, dispatch it to the webhook.
//!
//! Failure policy is log-and-continue. A malformed inner message still
//! produces a (degraded, all-empty) notification rather than dropping the
//! event. Only an envelope without records aborts the send, since there is
//! nothing to forward at all.

use crate::{
    envelope::{AlarmEvent, Envelope, EnvelopeError},
    message::build_message,
    settings::Settings,
    webhook::WebhookDispatcher,
};

/// the single component of this system, constructed fresh per invocation
pub struct Notifier {
    dispatcher: WebhookDispatcher,
    attachment_title: String,
}

impl Notifier {
    /// construct a notifier against the given settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            dispatcher: WebhookDispatcher::new(settings),
            attachment_title: settings.attachment_title.clone(),
        }
    }

    /// Handles one envelope.
    ///
    /// Returns nothing; every outcome is observable only through logs and
    /// the delivered message (or its absence).
    pub async fn handle(&self, envelope: Envelope) {
        let event = match envelope.alarm_event() {
            Ok(event) => event,
            Err(EnvelopeError::Empty) => {
                tracing::error!("envelope contains no records, nothing to forward");
                return;
            }
            Err(EnvelopeError::MalformedMessage { raw, source }) => {
                tracing::warn!(
                    raw = %raw,
                    error = %source,
                    "malformed alarm message, forwarding degraded notification"
                );
                AlarmEvent::default()
            }
        };

        let message = build_message(
            &event.new_state_value,
            &event.alarm_name,
            &event.new_state_reason,
            &self.attachment_title,
        );

        if let Err(err) = self.dispatcher.dispatch(&message).await {
            tracing::error!(error = %err, alarm = %event.alarm_name, "sending failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::Json, http::StatusCode, routing::post, Router};
    use serde_json::{json, Value};
    use tokio::{net::TcpListener, sync::mpsc};
    use url::Url;

    use super::*;
    use crate::message::DEFAULT_TITLE;

    /// bind a local endpoint that answers 200 and forwards every received
    /// body into the returned channel
    async fn spawn_capture_endpoint() -> (Url, mpsc::Receiver<Value>) {
        let (tx, rx) = mpsc::channel(1);

        let app = Router::new().route(
            "/hook",
            post(move |Json(body): Json<Value>| {
                let tx = tx.clone();
                async move {
                    tx.send(body).await.unwrap();
                    StatusCode::OK
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (Url::parse(&url).unwrap(), rx)
    }

    fn notifier(url: Url) -> Notifier {
        let settings = Settings {
            webhook_url: url,
            attachment_title: DEFAULT_TITLE.to_owned(),
            log_level: "info".to_owned(),
        };

        Notifier::new(&settings)
    }

    fn envelope(inner_message: &str) -> Envelope {
        serde_json::from_value(json!({
            "Records": [ { "Sns": { "Type": "Notification", "Message": inner_message } } ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn forwards_alarm_transition_verbatim() {
        let (url, mut rx) = spawn_capture_endpoint().await;

        let envelope = envelope(
            r#"{"AlarmName":"my-app","NewStateValue":"ALARM","NewStateReason":"Threshold Crossed"}"#,
        );
        notifier(url).handle(envelope).await;

        assert_eq!(
            rx.recv().await.unwrap(),
            json!({
                "text": "my-app",
                "attachments": [
                    {
                        "text": "`Threshold Crossed`",
                        "color": "danger",
                        "title": "Elastic Beanstalk notification",
                    }
                ]
            })
        );
    }

    #[tokio::test]
    async fn state_selects_the_color() {
        let (url, mut rx) = spawn_capture_endpoint().await;
        let notifier = notifier(url);

        notifier
            .handle(envelope(r#"{"AlarmName":"a","NewStateValue":"OK","NewStateReason":"r"}"#))
            .await;
        assert_eq!(rx.recv().await.unwrap()["attachments"][0]["color"], "good");

        notifier
            .handle(envelope(
                r#"{"AlarmName":"a","NewStateValue":"INSUFFICIENT_DATA","NewStateReason":"r"}"#,
            ))
            .await;
        assert_eq!(rx.recv().await.unwrap()["attachments"][0]["color"], "warning");
    }

    #[tokio::test]
    async fn malformed_message_still_sends_a_degraded_notification() {
        let (url, mut rx) = spawn_capture_endpoint().await;

        notifier(url).handle(envelope("not json")).await;

        assert_eq!(
            rx.recv().await.unwrap(),
            json!({
                "text": "",
                "attachments": [
                    {
                        "text": "``",
                        "color": "warning",
                        "title": "Elastic Beanstalk notification",
                    }
                ]
            })
        );
    }

    #[tokio::test]
    async fn empty_envelope_sends_nothing() {
        let (url, mut rx) = spawn_capture_endpoint().await;

        let empty: Envelope = serde_json::from_str(r#"{"Records":[]}"#).unwrap();
        notifier(url).handle(empty).await;

        assert!(rx.try_recv().is_err());
    }
}
