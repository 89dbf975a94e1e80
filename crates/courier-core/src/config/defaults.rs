//! Default value functions used by serde for config deserialization.

pub fn default_api_access_point() -> String {
    "https://api.telegram.org/bot".to_string()
}

pub fn default_request_timeout_secs() -> u64 {
    30
}

pub fn default_webhook_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_webhook_port() -> u16 {
    8443
}

pub fn default_webhook_path() -> String {
    "/webhook".to_string()
}

pub fn default_body_limit() -> usize {
    1024 * 1024
}

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_bot_log_file() -> String {
    "logs/bot.log".to_string()
}

pub fn default_error_log_file() -> String {
    "logs/error.log".to_string()
}

pub fn default_archive_log_file() -> String {
    "logs/archive.log".to_string()
}

pub fn default_archive_dir() -> String {
    "archives".to_string()
}

/// 2 MiB.
pub fn default_max_size_bytes() -> u64 {
    2 * 1024 * 1024
}

/// One day.
pub fn default_archive_interval_secs() -> u64 {
    24 * 60 * 60
}
