use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_FILENAME: &str = ".env";
/// Overrides the location of the env file
const ENV_FILE_VAR: &str = "SLACK_HOOKS_ENV_FILE";

pub const WEBHOOK_URL_KEY: &str = "SLACK_WEBHOOK_URL";
pub const DEFAULT_CHANNEL_KEY: &str = "SLACK_DEFAULT_CHANNEL";
pub const DEFAULT_CHANNEL: &str = "#claude-code";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SLACK_WEBHOOK_URL not found in {}", .0.display())]
    MissingWebhookUrl(PathBuf),

    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Slack settings resolved from the env file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackConfig {
    pub webhook_url: String,
    pub default_channel: String,
}

/// Raw KEY=value pairs from a dotenv-style file.
/// Every key is kept, even ones nothing reads.
#[derive(Debug, Default)]
pub struct EnvFile {
    vars: HashMap<String, String>,
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        let vars = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Strip one layer of matching `"` or `'` quotes.
fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(value)
}

/// Location of the env file: $SLACK_HOOKS_ENV_FILE if set, otherwise
/// `.env` next to the running executable.
pub fn env_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(ENV_FILE_VAR).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join(ENV_FILENAME)
}

/// Loads Slack settings from the default env file location.
pub fn load_config() -> Result<SlackConfig, ConfigError> {
    load_config_from(&env_file_path())
}

/// Loads Slack settings from `path`. A missing file counts as empty;
/// only a missing webhook URL is fatal.
pub fn load_config_from(path: &Path) -> Result<SlackConfig, ConfigError> {
    let env = match fs::read_to_string(path) {
        Ok(content) => EnvFile::parse(&content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "env file not found");
            EnvFile::default()
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let webhook_url = match env.get(WEBHOOK_URL_KEY) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(ConfigError::MissingWebhookUrl(path.to_path_buf())),
    };
    let default_channel = env
        .get(DEFAULT_CHANNEL_KEY)
        .unwrap_or(DEFAULT_CHANNEL)
        .to_string();

    Ok(SlackConfig {
        webhook_url,
        default_channel,
    })
}
