use serde::{Deserialize, Serialize};

use super::{Chat, ChatInviteLink, ChatMember, Message};
use crate::error::CourierError;

/// The `{ok, result, error_code, description}` wrapper around every bot API
/// response.
///
/// `ok == false` is the authoritative sign that the platform rejected the
/// call, regardless of the HTTP status it came with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub description: String,
}

impl<T> Envelope<T> {
    /// Turn a rejection into [`CourierError::Rejected`]. An accepted call
    /// without a result yields the result type's zero value.
    pub fn into_result(self) -> Result<T, CourierError>
    where
        T: Default,
    {
        if self.ok {
            Ok(self.result.unwrap_or_default())
        } else {
            Err(CourierError::Rejected {
                code: self.error_code,
                description: self.description,
            })
        }
    }
}

impl<T: Serialize + std::fmt::Debug> Envelope<T> {
    /// Compact JSON rendering for log lines.
    pub fn to_log_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Result of an edit: the edited message, or a bare `true` when the edited
/// message was sent via inline mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditedMessage {
    Message(Box<Message>),
    Inline(bool),
}

impl Default for EditedMessage {
    fn default() -> Self {
        Self::Inline(false)
    }
}

pub type MessageResponse = Envelope<Message>;
pub type EditResponse = Envelope<EditedMessage>;
pub type ChatResponse = Envelope<Chat>;
pub type ChatMemberResponse = Envelope<ChatMember>;
pub type ChatMembersResponse = Envelope<Vec<ChatMember>>;
pub type ChatInviteLinkResponse = Envelope<ChatInviteLink>;
/// Calls whose result is a bare value (`true`, a count, a link string).
pub type DefaultResponse = Envelope<serde_json::Value>;
