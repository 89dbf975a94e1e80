use courier_core::chat_id::ChatId;
use courier_core::error::CourierError;
use courier_core::types::{ChatPermissions, DefaultResponse};

use crate::client::{BotClient, Verb};
use crate::form::Form;
use crate::options::{BanOptions, PromoteOptions, RestrictOptions, UnbanOptions};

// All of these need the bot to be an administrator with the matching right.

impl BotClient {
    pub async fn ban_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        options: Option<&BanOptions>,
    ) -> Result<DefaultResponse, CourierError> {
        let defaults = BanOptions::default();
        let opts = options.unwrap_or(&defaults);
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("user_id", user_id)
            .int("until_date", opts.until_date)
            .flag("revoke_messages", opts.revoke_messages);
        self.call(Verb::Post, "banChatMember", "banning chat member", form)
            .await
    }

    pub async fn unban_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        options: Option<&UnbanOptions>,
    ) -> Result<DefaultResponse, CourierError> {
        let only_if_banned = options.is_some_and(|o| o.only_if_banned);
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("user_id", user_id)
            .flag("only_if_banned", only_if_banned);
        self.call(Verb::Post, "unbanChatMember", "unbanning chat member", form)
            .await
    }

    /// Replace a member's permissions. Pass [`ChatPermissions::all`] to lift
    /// every restriction.
    pub async fn restrict_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        permissions: &ChatPermissions,
        options: Option<&RestrictOptions>,
    ) -> Result<DefaultResponse, CourierError> {
        let until_date = options.map_or(0, |o| o.until_date);
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("user_id", user_id)
            .json("permissions", permissions)
            .int("until_date", until_date);
        self.call(
            Verb::Post,
            "restrictChatMember",
            "restricting chat member",
            form,
        )
        .await
    }

    /// Grant or revoke administrator rights. With no options every right is
    /// revoked, which demotes the member.
    pub async fn promote_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        options: Option<&PromoteOptions>,
    ) -> Result<DefaultResponse, CourierError> {
        let defaults = PromoteOptions::default();
        let opts = options.unwrap_or(&defaults);
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("user_id", user_id)
            .flag("is_anonymous", opts.is_anonymous)
            .flag("can_manage_chat", opts.can_manage_chat)
            .flag("can_post_messages", opts.can_post_messages)
            .flag("can_edit_messages", opts.can_edit_messages)
            .flag("can_delete_messages", opts.can_delete_messages)
            .flag("can_manage_voice_chats", opts.can_manage_voice_chats)
            .flag("can_restrict_members", opts.can_restrict_members)
            .flag("can_promote_members", opts.can_promote_members)
            .flag("can_change_info", opts.can_change_info)
            .flag("can_invite_users", opts.can_invite_users)
            .flag("can_pin_messages", opts.can_pin_messages);
        self.call(
            Verb::Post,
            "promoteChatMember",
            "promoting chat member",
            form,
        )
        .await
    }

    /// Custom title for an administrator the bot promoted. 0-16 characters,
    /// emoji are not allowed.
    pub async fn set_chat_administrator_custom_title(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        custom_title: &str,
    ) -> Result<DefaultResponse, CourierError> {
        if custom_title.chars().count() > 16 {
            return Err(CourierError::InvalidArgument(format!(
                "custom title is longer than 16 characters: {custom_title}"
            )));
        }
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("user_id", user_id)
            .text("custom_title", custom_title);
        self.call(
            Verb::Post,
            "setChatAdministratorCustomTitle",
            "setting administrator custom title",
            form,
        )
        .await
    }

    /// Default permissions for every non-administrator member.
    pub async fn set_chat_permissions(
        &self,
        chat_id: impl Into<ChatId>,
        permissions: &ChatPermissions,
    ) -> Result<DefaultResponse, CourierError> {
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .json("permissions", permissions);
        self.call(
            Verb::Post,
            "setChatPermissions",
            "setting chat permissions",
            form,
        )
        .await
    }
}
