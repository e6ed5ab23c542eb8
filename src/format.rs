use crate::input::{HookEvent, NotificationInput, PostToolUseInput, PreToolUseInput};
use serde_json::{Map, Value};

/// Tools whose summary is the file they write to
const FILE_WRITE_TOOLS: [&str; 3] = ["Write", "Edit", "MultiEdit"];
/// Only string parameters shorter than this are shown for other tools
const MAX_PARAM_CHARS: usize = 100;
const MAX_PARAMS: usize = 3;
const SHORT_SESSION_CHARS: usize = 8;

/// Render the Slack message text for an event.
/// Tool events get a trailing session line; notifications don't.
pub fn format_message(event: &HookEvent) -> String {
    let message = match event {
        HookEvent::PreToolUse(input) => format_pre_tool_use(input),
        HookEvent::PostToolUse(input) => format_post_tool_use(input),
        HookEvent::Notification(input) => return format_notification(input),
    };
    with_session(message, event.session_id())
}

pub fn format_pre_tool_use(input: &PreToolUseInput) -> String {
    let tool_name = &input.tool_name;
    let tool_input = &input.tool_input;
    let mut message = format!("🔧 Tool: `{}`", tool_name);

    match tool_name.as_str() {
        "Bash" => {
            message.push_str(&format!("\n```{}```", str_field(tool_input, "command")));
            let description = str_field(tool_input, "description");
            if !description.is_empty() {
                message.push_str(&format!("\n_{}_", description));
            }
        }
        name if FILE_WRITE_TOOLS.contains(&name) => {
            message.push_str(&format!("\nFile: `{}`", str_field(tool_input, "file_path")));
        }
        "Read" => {
            message.push_str(&format!(
                "\nReading: `{}`",
                str_field(tool_input, "file_path")
            ));
        }
        _ => {
            let params = short_params(tool_input);
            if !params.is_empty() {
                message.push('\n');
                message.push_str(&params.join("\n"));
            }
        }
    }

    message
}

pub fn format_post_tool_use(input: &PostToolUseInput) -> String {
    let tool_name = &input.tool_name;

    if let Some(Value::Object(response)) = &input.tool_response {
        if let Some(error) = response.get("error").filter(|e| is_truthy(e)) {
            return format!("❌ Failed: `{}`\n{}", tool_name, display_value(error));
        }
        if response.get("success") == Some(&Value::Bool(false)) {
            return format!("⚠️ Warning: `{}`", tool_name);
        }
    }

    format!("✅ Completed: `{}`", tool_name)
}

pub fn format_notification(input: &NotificationInput) -> String {
    format!("📢 {}: {}", input.title, input.message)
}

/// Append the shortened session id, if there is one.
pub fn with_session(mut message: String, session_id: &str) -> String {
    if !session_id.is_empty() {
        let short_id: String = session_id.chars().take(SHORT_SESSION_CHARS).collect();
        message.push_str(&format!("\n_Session: {}_", short_id));
    }
    message
}

/// `key: value` lines for the first few short string parameters, in input order.
fn short_params(tool_input: &Map<String, Value>) -> Vec<String> {
    tool_input
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) if s.chars().count() < MAX_PARAM_CHARS => {
                Some(format!("{}: {}", key, s))
            }
            _ => None,
        })
        .take(MAX_PARAMS)
        .collect()
}

/// String value of `key`, or "" when absent or not a string.
fn str_field<'a>(tool_input: &'a Map<String, Value>, key: &str) -> &'a str {
    tool_input.get(key).and_then(Value::as_str).unwrap_or("")
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
