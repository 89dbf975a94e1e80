use serde::{Deserialize, Serialize};

use super::{CallbackQuery, Message};

/// One inbound event delivered to the bot's webhook.
///
/// The platform populates at most one of the variant fields per delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Update {
    pub update_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

/// Which variant an [`Update`] carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateKind<'a> {
    Message(&'a Message),
    EditedMessage(&'a Message),
    ChannelPost(&'a Message),
    EditedChannelPost(&'a Message),
    CallbackQuery(&'a CallbackQuery),
    /// A variant this library does not model.
    Unknown,
}

impl Update {
    pub fn kind(&self) -> UpdateKind<'_> {
        if let Some(m) = &self.message {
            UpdateKind::Message(m)
        } else if let Some(m) = &self.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(m) = &self.channel_post {
            UpdateKind::ChannelPost(m)
        } else if let Some(m) = &self.edited_channel_post {
            UpdateKind::EditedChannelPost(m)
        } else if let Some(q) = &self.callback_query {
            UpdateKind::CallbackQuery(q)
        } else {
            UpdateKind::Unknown
        }
    }

    /// Chat the update originated from, when there is one.
    pub fn chat_id(&self) -> Option<i64> {
        match self.kind() {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(m.chat.id),
            UpdateKind::CallbackQuery(q) => q.message.as_ref().map(|m| m.chat.id),
            UpdateKind::Unknown => None,
        }
    }
}
