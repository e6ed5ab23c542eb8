use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USERNAME: &str = "Claude Code";

/// Body of an incoming-webhook message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackPayload {
    pub text: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
}

impl SlackPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            username: DEFAULT_USERNAME.to_string(),
            channel: None,
            icon_emoji: None,
        }
    }

    /// Empty channels are dropped so Slack falls back to the webhook's own
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        let channel = channel.into();
        self.channel = (!channel.is_empty()).then_some(channel);
        self
    }

    pub fn with_icon(mut self, icon_emoji: impl Into<String>) -> Self {
        let icon_emoji = icon_emoji.into();
        self.icon_emoji = (!icon_emoji.is_empty()).then_some(icon_emoji);
        self
    }
}

/// POST `payload` to the webhook. Returns true only on HTTP 200.
/// Failures are logged, never returned.
pub fn send_slack_message(webhook_url: &str, payload: &SlackPayload) -> bool {
    match post(webhook_url, payload) {
        Ok(status) if status == StatusCode::OK => {
            tracing::debug!(%status, "slack webhook accepted message");
            true
        }
        Ok(status) => {
            tracing::warn!(%status, "Error sending Slack message: unexpected status");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error sending Slack message");
            false
        }
    }
}

fn post(webhook_url: &str, payload: &SlackPayload) -> reqwest::Result<StatusCode> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let response = client.post(webhook_url).json(payload).send()?;
    Ok(response.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn payload() -> SlackPayload {
        SlackPayload::new("hello")
            .with_channel("#claude-code")
            .with_icon(":loudspeaker:")
    }

    async fn send_blocking(url: String, payload: SlackPayload) -> bool {
        tokio::task::spawn_blocking(move || send_slack_message(&url, &payload))
            .await
            .unwrap()
    }

    #[test]
    fn test_payload_serialization_skips_missing_fields() {
        let value = serde_json::to_value(SlackPayload::new("hi")).unwrap();
        assert_eq!(value, json!({"text": "hi", "username": "Claude Code"}));
    }

    #[test]
    fn test_payload_serialization_full() {
        let value = serde_json::to_value(payload()).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "hello",
                "username": "Claude Code",
                "channel": "#claude-code",
                "icon_emoji": ":loudspeaker:"
            })
        );
    }

    #[test]
    fn test_empty_channel_dropped() {
        assert!(SlackPayload::new("x").with_channel("").channel.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_success_on_200() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/hook"))
            .and(matchers::header("content-type", "application/json"))
            .and(matchers::body_json(json!({
                "text": "hello",
                "username": "Claude Code",
                "channel": "#claude-code",
                "icon_emoji": ":loudspeaker:"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(send_blocking(format!("{}/hook", server.uri()), payload()).await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_fails_on_204() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        assert!(!send_blocking(server.uri(), payload()).await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(!send_blocking(server.uri(), payload()).await);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_send_fails_after_timeout() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(12)))
            .mount(&server)
            .await;

        let started = std::time::Instant::now();
        assert!(!send_blocking(server.uri(), payload()).await);
        let elapsed = started.elapsed();
        assert!(elapsed >= REQUEST_TIMEOUT, "gave up early: {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(12), "no timeout: {:?}", elapsed);
    }

    #[test]
    fn test_request_timeout_is_ten_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(10));
    }

    #[test]
    fn test_send_fails_on_invalid_url() {
        assert!(!send_slack_message("not a url", &payload()));
    }

    #[test]
    fn test_send_fails_on_connection_refused() {
        // Bind then drop to get a port nothing listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        assert!(!send_slack_message(
            &format!("http://127.0.0.1:{}/hook", port),
            &payload()
        ));
    }
}
