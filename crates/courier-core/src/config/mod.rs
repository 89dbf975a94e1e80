mod defaults;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CourierError;
use crate::logger::LogMode;
use defaults::*;

/// Top-level Courier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Bot API access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Base URL the access token is appended to, e.g. `https://api.telegram.org/bot`.
    #[serde(default = "default_api_access_point")]
    pub api_access_point: String,
    #[serde(default)]
    pub access_token: String,
    /// Channel used by `post_to_channel` (e.g. `@my_channel`).
    #[serde(default)]
    pub channel_name: String,
    /// Per-request timeout. 0 keeps the transport default.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_access_point: default_api_access_point(),
            access_token: String::new(),
            channel_name: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BotConfig {
    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Inbound webhook server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default = "default_webhook_host")]
    pub host: String,
    #[serde(default = "default_webhook_port")]
    pub port: u16,
    #[serde(default = "default_webhook_path")]
    pub path: String,
    /// Expected value of the `X-Telegram-Bot-Api-Secret-Token` header. Empty = not checked.
    #[serde(default)]
    pub secret_token: String,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: default_webhook_host(),
            port: default_webhook_port(),
            path: default_webhook_path(),
            secret_token: String::new(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Log destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub mode: LogMode,
    /// Directory for the process trace log.
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_bot_log_file")]
    pub bot_log_file: String,
    #[serde(default = "default_error_log_file")]
    pub error_log_file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::default(),
            dir: default_log_dir(),
            bot_log_file: default_bot_log_file(),
            error_log_file: default_error_log_file(),
        }
    }
}

/// Log archival settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_archive_dir")]
    pub dir: String,
    /// Files at or above this size are archived and truncated.
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
    #[serde(default = "default_archive_interval_secs")]
    pub interval_secs: u64,
    /// Extra files to watch besides the bot and error logs.
    #[serde(default)]
    pub extra_files: Vec<String>,
    /// Journal of archival activity. Empty = tracing only.
    #[serde(default = "default_archive_log_file")]
    pub log_file: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            dir: default_archive_dir(),
            max_size_bytes: default_max_size_bytes(),
            interval_secs: default_archive_interval_secs(),
            extra_files: Vec::new(),
            log_file: default_archive_log_file(),
        }
    }
}

impl ArchiveConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, CourierError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| CourierError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, CourierError> {
    toml::from_str(content).map_err(|e| CourierError::Config(format!("failed to parse config: {e}")))
}
