//! Chat identifiers: a numeric id or a `@channel` style alias.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CourierError;

/// Identifies the target chat of an API call.
///
/// Private chats, groups and supergroups are addressed by their signed id.
/// Public channels can also be addressed by their `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Numeric(i64),
    Alias(String),
}

impl ChatId {
    /// Resolve the identifier into the text sent on the wire.
    ///
    /// An empty alias is rejected.
    pub fn to_wire(&self) -> Result<String, CourierError> {
        match self {
            Self::Numeric(id) => Ok(id.to_string()),
            Self::Alias(alias) if alias.is_empty() => Err(CourierError::InvalidArgument(
                "chat id alias must not be empty".into(),
            )),
            Self::Alias(alias) => Ok(alias.clone()),
        }
    }

    /// Build a chat id from a loosely typed JSON value (for example one read
    /// from a config file or an inbound payload).
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CourierError> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Numeric).ok_or_else(|| {
                CourierError::InvalidArgument(format!(
                    "chat id can only be a string or an integer, got {n}"
                ))
            }),
            serde_json::Value::String(s) if !s.is_empty() => Ok(Self::Alias(s.clone())),
            other => Err(CourierError::InvalidArgument(format!(
                "chat id can only be a string or an integer, got {other}"
            ))),
        }
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Alias(alias) => f.write_str(alias),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for ChatId {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_string())
    }
}

impl From<String> for ChatId {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}
