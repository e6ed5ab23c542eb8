use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Input JSON for the PreToolUse hook
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreToolUseInput {
    #[serde(deserialize_with = "null_as_default")]
    pub tool_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_input: Map<String, Value>,
    pub session_id: Option<String>,
}

/// Input JSON for the PostToolUse hook
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostToolUseInput {
    #[serde(deserialize_with = "null_as_default")]
    pub tool_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tool_input: Map<String, Value>,
    /// Usually an object, but only objects are inspected
    pub tool_response: Option<Value>,
    pub session_id: Option<String>,
}

/// Input JSON for the Notification hook
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotificationInput {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    pub session_id: Option<String>,
    /// Overrides SLACK_DEFAULT_CHANNEL when non-empty
    pub channel: Option<String>,
}

/// A parsed hook event, one variant per entry program
#[derive(Debug)]
pub enum HookEvent {
    PreToolUse(PreToolUseInput),
    PostToolUse(PostToolUseInput),
    Notification(NotificationInput),
}

impl HookEvent {
    pub fn session_id(&self) -> &str {
        let id = match self {
            HookEvent::PreToolUse(input) => &input.session_id,
            HookEvent::PostToolUse(input) => &input.session_id,
            HookEvent::Notification(input) => &input.session_id,
        };
        id.as_deref().unwrap_or("")
    }
}
