use thiserror::Error;

/// Top-level error type for Courier.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Caller supplied a parameter the bot API cannot accept. Raised before
    /// any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network-level failure talking to the bot API.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not a valid envelope.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The platform answered with `ok: false`.
    #[error("rejected by bot api ({code}): {description}")]
    Rejected { code: i64, description: String },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Log archival error.
    #[error("archive error: {0}")]
    Archive(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
