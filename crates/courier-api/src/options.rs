//! Optional parameters, one struct per operation.
//!
//! Passing `None` for an operation's options means "documented defaults".
//! Passing `Some(&opts)` sends every field of `opts`, unset ones as their
//! zero value. The one exception is `parse_mode` on text sends and text
//! edits: when it is `None` HTML is sent either way. Captioned media and
//! caption edits only fall back to HTML when no options are passed.

use courier_core::chat_id::ChatId;
use courier_core::error::CourierError;
use courier_core::types::MessageEntity;

use crate::form::Form;

/// Text formatting mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Html,
    MarkdownV2,
    /// Legacy markdown.
    Markdown,
    /// No formatting; sent as an empty value.
    Plain,
}

impl ParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::MarkdownV2 => "MarkdownV2",
            Self::Markdown => "Markdown",
            Self::Plain => "",
        }
    }

    pub(crate) fn resolve(mode: Option<Self>) -> &'static str {
        mode.unwrap_or_default().as_str()
    }

    /// Like [`ParseMode::resolve`], but an unset mode inside supplied
    /// options is sent empty.
    pub(crate) fn resolve_strict(options_given: bool, mode: Option<Self>) -> &'static str {
        match mode {
            Some(m) => m.as_str(),
            None if options_given => "",
            None => Self::Html.as_str(),
        }
    }
}

/// Which message an edit applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    /// A message the bot sent to a chat.
    Chat { chat_id: ChatId, message_id: i64 },
    /// A message sent via inline mode.
    Inline(String),
}

impl MessageTarget {
    pub fn chat(chat_id: impl Into<ChatId>, message_id: i64) -> Self {
        Self::Chat {
            chat_id: chat_id.into(),
            message_id,
        }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        Self::Inline(inline_message_id.into())
    }

    /// Write `chat_id`, `message_id` and `inline_message_id`. The side that
    /// was not supplied goes out as empty strings.
    pub(crate) fn apply(&self, form: Form) -> Result<Form, CourierError> {
        match self {
            Self::Chat {
                chat_id,
                message_id,
            } => Ok(form
                .text("chat_id", chat_id.to_wire()?)
                .int("message_id", *message_id)
                .text("inline_message_id", "")),
            Self::Inline(id) if id.is_empty() => Err(CourierError::InvalidArgument(
                "inline message id must not be empty".into(),
            )),
            Self::Inline(id) => Ok(form
                .text("chat_id", "")
                .text("message_id", "")
                .text("inline_message_id", id.as_str())),
        }
    }
}

/// `sendMessage`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendMessageOptions {
    pub parse_mode: Option<ParseMode>,
    pub entities: Vec<MessageEntity>,
    pub reply_to_message_id: i64,
    pub disable_notification: bool,
    pub disable_web_page_preview: bool,
    pub protect_content: bool,
    pub allow_sending_without_reply: bool,
    /// Output of one of the [`crate::keyboard`] builders.
    pub reply_markup: String,
}

/// `editMessageText`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditTextOptions {
    pub parse_mode: Option<ParseMode>,
    pub entities: Vec<MessageEntity>,
    pub disable_web_page_preview: bool,
    pub reply_markup: String,
}

/// `editMessageCaption`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditCaptionOptions {
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Vec<MessageEntity>,
    pub reply_markup: String,
}

/// `editMessageReplyMarkup` and `editMessageMedia`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyMarkupOptions {
    pub reply_markup: String,
}

/// `sendDocument`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendDocumentOptions {
    pub thumb: String,
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Vec<MessageEntity>,
    pub disable_content_type_detection: bool,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub reply_to_message_id: i64,
    pub allow_sending_without_reply: bool,
    pub reply_markup: String,
}

/// `sendVideo`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendVideoOptions {
    pub duration: i64,
    pub width: i64,
    pub height: i64,
    pub thumb: String,
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Vec<MessageEntity>,
    pub supports_streaming: bool,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub reply_to_message_id: i64,
    pub allow_sending_without_reply: bool,
    pub reply_markup: String,
}

/// `sendAnimation`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendAnimationOptions {
    pub duration: i64,
    pub width: i64,
    pub height: i64,
    pub thumb: String,
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Vec<MessageEntity>,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub reply_to_message_id: i64,
    pub allow_sending_without_reply: bool,
    pub reply_markup: String,
}

/// `answerCallbackQuery`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerCallbackOptions {
    pub text: String,
    pub show_alert: bool,
    pub url: String,
    /// Seconds the client may cache the answer.
    pub cache_time: i64,
}

/// `createChatInviteLink` and `editChatInviteLink`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteLinkOptions {
    pub name: String,
    /// Unix time; 0 = never.
    pub expire_date: i64,
    /// 0 = unlimited.
    pub member_limit: i64,
    pub creates_join_request: bool,
}

/// `banChatMember`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BanOptions {
    /// Unix time; 0 = forever.
    pub until_date: i64,
    pub revoke_messages: bool,
}

/// `unbanChatMember`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnbanOptions {
    pub only_if_banned: bool,
}

/// `restrictChatMember`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictOptions {
    /// Unix time; 0 = forever.
    pub until_date: i64,
}

/// `promoteChatMember`. Every flag left `false` is revoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoteOptions {
    pub is_anonymous: bool,
    pub can_manage_chat: bool,
    pub can_post_messages: bool,
    pub can_edit_messages: bool,
    pub can_delete_messages: bool,
    pub can_manage_voice_chats: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    pub can_pin_messages: bool,
}

/// Layout hints for [`crate::keyboard::reply_keyboard`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyKeyboardOptions {
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
    pub input_field_placeholder: String,
    pub selective: bool,
}
