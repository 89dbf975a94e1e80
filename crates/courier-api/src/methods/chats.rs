use courier_core::chat_id::ChatId;
use courier_core::error::CourierError;
use courier_core::types::{ChatMemberResponse, ChatMembersResponse, ChatResponse, DefaultResponse};

use crate::client::{BotClient, Verb};
use crate::form::Form;

// Read-only lookups go out as GET with a query string.

impl BotClient {
    pub async fn get_chat(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<ChatResponse, CourierError> {
        let form = Form::new().text("chat_id", chat_id.into().to_wire()?);
        self.call(Verb::Get, "getChat", "getting chat", form).await
    }

    pub async fn get_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<ChatMemberResponse, CourierError> {
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("user_id", user_id);
        self.call(Verb::Get, "getChatMember", "getting chat member", form)
            .await
    }

    /// Administrators of a group; bots are not listed.
    pub async fn get_chat_administrators(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<ChatMembersResponse, CourierError> {
        let form = Form::new().text("chat_id", chat_id.into().to_wire()?);
        self.call(
            Verb::Get,
            "getChatAdministrators",
            "getting chat administrators",
            form,
        )
        .await
    }

    /// The result is a bare integer.
    pub async fn get_chat_member_count(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<DefaultResponse, CourierError> {
        let form = Form::new().text("chat_id", chat_id.into().to_wire()?);
        self.call(
            Verb::Get,
            "getChatMemberCount",
            "getting chat member count",
            form,
        )
        .await
    }
}
