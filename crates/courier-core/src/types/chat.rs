use serde::{Deserialize, Serialize};

use super::Message;

/// A platform account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub language_code: String,
    pub can_join_groups: bool,
    pub can_read_all_group_messages: bool,
    pub supports_inline_queries: bool,
}

/// The conversation a message belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chat {
    pub id: i64,
    /// "private", "group", "supergroup" or "channel".
    #[serde(rename = "type")]
    pub chat_type: String,
    pub title: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    pub invite_link: String,
    pub pinned_message: Option<Box<Message>>,
    pub permissions: Option<ChatPermissions>,
    pub slow_mode_delay: i64,
    pub message_auto_delete_time: i64,
    pub sticker_set_name: String,
    pub can_set_sticker_set: bool,
    pub linked_chat_id: i64,
}

impl Chat {
    pub fn is_group(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }
}

/// Member record returned by `getChatMember` and `getChatAdministrators`.
///
/// The platform sends one of several shapes depending on `status`; they are
/// flattened here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMember {
    /// "creator", "administrator", "member", "restricted", "left" or "kicked".
    pub status: String,
    pub user: User,
    pub is_anonymous: bool,
    pub custom_title: String,

    // administrator
    pub can_be_edited: bool,
    pub can_manage_chat: bool,
    pub can_delete_messages: bool,
    pub can_manage_voice_chats: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    pub can_post_messages: bool,
    pub can_edit_messages: bool,
    pub can_pin_messages: bool,

    // restricted
    pub is_member: bool,
    pub can_send_messages: bool,
    pub can_send_media_messages: bool,
    pub can_send_polls: bool,
    pub can_send_other_messages: bool,
    pub can_add_web_page_previews: bool,
    /// Unix time; 0 = forever.
    pub until_date: i64,
}

impl ChatMember {
    pub fn is_admin(&self) -> bool {
        matches!(self.status.as_str(), "creator" | "administrator")
    }
}

/// An invite link for a chat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatInviteLink {
    pub invite_link: String,
    pub creator: User,
    pub creates_join_request: bool,
    pub is_primary: bool,
    pub is_revoked: bool,
    pub name: String,
    pub expire_date: i64,
    pub member_limit: i64,
    pub pending_join_request_count: i64,
}

/// Actions a non-administrator member is allowed to take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPermissions {
    pub can_send_messages: bool,
    pub can_send_media_messages: bool,
    pub can_send_polls: bool,
    pub can_send_other_messages: bool,
    pub can_add_web_page_previews: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    pub can_pin_messages: bool,
}

impl ChatPermissions {
    /// Everything a regular member can do.
    pub fn all() -> Self {
        Self {
            can_send_messages: true,
            can_send_media_messages: true,
            can_send_polls: true,
            can_send_other_messages: true,
            can_add_web_page_previews: true,
            can_change_info: true,
            can_invite_users: true,
            can_pin_messages: true,
        }
    }

    /// Read-only: every permission revoked.
    pub fn none() -> Self {
        Self::default()
    }
}
