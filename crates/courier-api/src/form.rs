//! Flat string-valued request parameters.
//!
//! The bot API takes every field as text: integers in decimal, booleans as
//! `true`/`false`, and structured values as embedded JSON.

use serde::Serialize;
use std::fmt;

use courier_core::types::MessageEntity;

/// Ordered list of request fields, sent as a form body or a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<(&'static str, String)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }

    pub fn int(self, key: &'static str, value: i64) -> Self {
        self.text(key, value.to_string())
    }

    pub fn flag(self, key: &'static str, value: bool) -> Self {
        self.text(key, if value { "true" } else { "false" })
    }

    /// Embed a structured value as JSON text.
    pub fn json<T: Serialize + ?Sized>(self, key: &'static str, value: &T) -> Self {
        self.text(key, to_json(value))
    }

    /// Entity lists go out as a JSON array, or `""` when empty.
    pub fn entities(self, key: &'static str, entities: &[MessageEntity]) -> Self {
        if entities.is_empty() {
            self.text(key, "")
        } else {
            self.json(key, entities)
        }
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Renders `{ chat_id : 42, text : hi }` for log lines.
impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} : {value}")?;
        }
        f.write_str(" }")
    }
}

/// Plain data records only; serializing them cannot fail.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
