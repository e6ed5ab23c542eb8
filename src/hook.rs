use crate::config::{self, ConfigError, SlackConfig};
use crate::format;
use crate::input::HookEvent;
use crate::slack::{self, SlackPayload};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use std::io::{self, Read};
use std::process::ExitCode;
use thiserror::Error;

/// Which entry program is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    PreToolUse,
    PostToolUse,
    Notification,
}

impl HookKind {
    fn icon_emoji(self) -> &'static str {
        match self {
            HookKind::PreToolUse => ":hammer_and_wrench:",
            HookKind::PostToolUse => ":white_check_mark:",
            HookKind::Notification => ":loudspeaker:",
        }
    }
}

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Failed to read stdin: {0}")]
    ReadInput(#[source] io::Error),

    #[error("Invalid JSON input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to send Slack notification")]
    Delivery,
}

/// Entry point shared by the hook binaries: stdin in, exit code out.
pub fn main(kind: HookKind) -> ExitCode {
    match run(kind, io::stdin().lock(), config::load_config) {
        Ok(confirmation) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{}", confirmation);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                match &e {
                    HookError::Delivery => eprintln!("{}", e),
                    _ => eprintln!("Error: {}", e),
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Parse the event, load config, format and deliver.
/// Returns the confirmation line to print on success.
pub fn run<R, F>(kind: HookKind, mut reader: R, load_config: F) -> Result<String, HookError>
where
    R: Read,
    F: FnOnce() -> Result<SlackConfig, ConfigError>,
{
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(HookError::ReadInput)?;
    let event = parse_event(kind, &buffer)?;

    let config = load_config()?;
    tracing::debug!(?kind, channel = %config.default_channel, "loaded slack config");

    let payload = build_payload(kind, &event, &config);
    tracing::debug!(len = payload.text.len(), "formatted message");

    if !slack::send_slack_message(&config.webhook_url, &payload) {
        return Err(HookError::Delivery);
    }

    Ok(match &event {
        HookEvent::PreToolUse(input) => {
            format!("Slack notification sent for {}", input.tool_name)
        }
        HookEvent::PostToolUse(input) => {
            format!("Slack notification sent for {}", input.tool_name)
        }
        HookEvent::Notification(_) => "Slack notification sent successfully".to_string(),
    })
}

/// Decode stdin as the event for `kind`. Anything but a JSON object is rejected.
pub fn parse_event(kind: HookKind, json: &[u8]) -> Result<HookEvent, HookError> {
    let value: Value = serde_json::from_slice(json)?;
    let event = match kind {
        HookKind::PreToolUse => HookEvent::PreToolUse(decode_object(value)?),
        HookKind::PostToolUse => HookEvent::PostToolUse(decode_object(value)?),
        HookKind::Notification => HookEvent::Notification(decode_object(value)?),
    };
    Ok(event)
}

fn decode_object<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    match value {
        Value::Object(_) => serde_json::from_value(value),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}

/// Only notifications may pick their own channel; an empty override is ignored.
pub fn build_payload(kind: HookKind, event: &HookEvent, config: &SlackConfig) -> SlackPayload {
    let channel = match event {
        HookEvent::Notification(input) => input
            .channel
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(config.default_channel.as_str()),
        _ => config.default_channel.as_str(),
    };

    SlackPayload::new(format::format_message(event))
        .with_channel(channel)
        .with_icon(kind.icon_emoji())
}
