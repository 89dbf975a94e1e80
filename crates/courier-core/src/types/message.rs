use serde::{Deserialize, Serialize};

use super::{Animation, Chat, Contact, Document, InlineKeyboardMarkup, User, Video};

/// A chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub sender_chat: Option<Chat>,
    /// Unix time.
    pub date: i64,
    pub chat: Chat,
    pub forward_from: Option<User>,
    pub forward_from_chat: Option<Chat>,
    pub forward_from_message_id: i64,
    pub forward_signature: String,
    pub forward_sender_name: String,
    pub forward_date: i64,
    pub reply_to_message: Option<Box<Message>>,
    pub via_bot: Option<User>,
    pub edit_date: i64,
    pub media_group_id: String,
    pub author_signature: String,
    pub text: Option<String>,
    pub entities: Vec<MessageEntity>,
    pub caption: Option<String>,
    pub caption_entities: Vec<MessageEntity>,
    pub document: Option<Document>,
    pub video: Option<Video>,
    pub animation: Option<Animation>,
    pub contact: Option<Contact>,
    pub new_chat_members: Vec<User>,
    pub left_chat_member: Option<User>,
    pub new_chat_title: String,
    pub delete_chat_photo: bool,
    pub group_chat_created: bool,
    pub supergroup_chat_created: bool,
    pub channel_chat_created: bool,
    pub migrate_to_chat_id: i64,
    pub migrate_from_chat_id: i64,
    pub connected_website: String,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// An inline-button interaction. Must be acknowledged exactly once with
/// `answerCallbackQuery`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub inline_message_id: String,
    pub chat_instance: String,
    pub data: String,
    pub game_short_name: String,
}

/// A special span in message text (mention, hashtag, bold, link, ...).
///
/// `offset` and `length` count UTF-16 code units, as the platform does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: i64,
    pub length: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: impl Into<String>, offset: i64, length: i64) -> Self {
        Self {
            kind: kind.into(),
            offset,
            length,
            ..Default::default()
        }
    }

    /// The slice of `text` this entity covers, or `None` if the span falls
    /// outside the text or splits a surrogate pair.
    pub fn extract(&self, text: &str) -> Option<String> {
        let start = usize::try_from(self.offset).ok()?;
        let len = usize::try_from(self.length).ok()?;
        let units: Vec<u16> = text.encode_utf16().collect();
        let span = units.get(start..start.checked_add(len)?)?;
        String::from_utf16(span).ok()
    }
}

/// Length of `text` in the unit entity offsets are measured in.
pub fn utf16_len(text: &str) -> i64 {
    text.encode_utf16().count() as i64
}
