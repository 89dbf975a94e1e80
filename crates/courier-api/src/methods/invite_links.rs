use courier_core::chat_id::ChatId;
use courier_core::error::CourierError;
use courier_core::types::{ChatInviteLinkResponse, DefaultResponse};

use crate::client::{BotClient, Verb};
use crate::form::Form;
use crate::options::InviteLinkOptions;

impl BotClient {
    /// Generate a new primary invite link, revoking the previous one. The
    /// result is the link as a bare string.
    pub async fn export_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<DefaultResponse, CourierError> {
        let form = Form::new().text("chat_id", chat_id.into().to_wire()?);
        self.call(
            Verb::Post,
            "exportChatInviteLink",
            "exporting chat invite link",
            form,
        )
        .await
    }

    pub async fn create_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        options: Option<&InviteLinkOptions>,
    ) -> Result<ChatInviteLinkResponse, CourierError> {
        let form = with_link_options(
            Form::new().text("chat_id", chat_id.into().to_wire()?),
            options,
        );
        self.call(
            Verb::Post,
            "createChatInviteLink",
            "creating chat invite link",
            form,
        )
        .await
    }

    /// Edit a non-primary link created by the bot.
    pub async fn edit_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        invite_link: &str,
        options: Option<&InviteLinkOptions>,
    ) -> Result<ChatInviteLinkResponse, CourierError> {
        let form = with_link_options(
            Form::new()
                .text("chat_id", chat_id.into().to_wire()?)
                .text("invite_link", require_link(invite_link)?),
            options,
        );
        self.call(
            Verb::Post,
            "editChatInviteLink",
            "editing chat invite link",
            form,
        )
        .await
    }

    pub async fn revoke_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        invite_link: &str,
    ) -> Result<ChatInviteLinkResponse, CourierError> {
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .text("invite_link", require_link(invite_link)?);
        self.call(
            Verb::Post,
            "revokeChatInviteLink",
            "revoking chat invite link",
            form,
        )
        .await
    }
}

fn with_link_options(form: Form, options: Option<&InviteLinkOptions>) -> Form {
    let defaults = InviteLinkOptions::default();
    let opts = options.unwrap_or(&defaults);
    form.text("name", opts.name.as_str())
        .int("expire_date", opts.expire_date)
        .int("member_limit", opts.member_limit)
        .flag("creates_join_request", opts.creates_join_request)
}

fn require_link(link: &str) -> Result<&str, CourierError> {
    if link.is_empty() {
        Err(CourierError::InvalidArgument(
            "invite link must not be empty".into(),
        ))
    } else {
        Ok(link)
    }
}
