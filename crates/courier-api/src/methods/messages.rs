use courier_core::chat_id::ChatId;
use courier_core::error::CourierError;
use courier_core::types::{DefaultResponse, EditResponse, InputMedia, MessageResponse};

use crate::client::{BotClient, Verb};
use crate::form::Form;
use crate::options::{
    EditCaptionOptions, EditTextOptions, MessageTarget, ParseMode, ReplyMarkupOptions,
    SendMessageOptions,
};

impl BotClient {
    /// Send a text message.
    ///
    /// To remove a reply keyboard pass the output of
    /// [`crate::keyboard::remove_keyboard`] as `reply_markup`.
    pub async fn send_message(
        &self,
        chat_id: impl Into<ChatId>,
        text: &str,
        options: Option<&SendMessageOptions>,
    ) -> Result<MessageResponse, CourierError> {
        let chat_id = chat_id.into().to_wire()?;
        self.send_message_to(chat_id, text, options, "sending message to chat")
            .await
    }

    /// Send a text message to the configured channel.
    pub async fn post_to_channel(
        &self,
        text: &str,
        options: Option<&SendMessageOptions>,
    ) -> Result<MessageResponse, CourierError> {
        let chat_id = ChatId::from(self.channel_name()).to_wire()?;
        self.send_message_to(chat_id, text, options, "posting to channel")
            .await
    }

    async fn send_message_to(
        &self,
        chat_id: String,
        text: &str,
        options: Option<&SendMessageOptions>,
        action: &str,
    ) -> Result<MessageResponse, CourierError> {
        let defaults = SendMessageOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = Form::new()
            .text("chat_id", chat_id)
            .text("text", text)
            .text("parse_mode", ParseMode::resolve(opts.parse_mode))
            .entities("entities", &opts.entities)
            .int("reply_to_message_id", opts.reply_to_message_id)
            .flag("disable_notification", opts.disable_notification)
            .flag("disable_web_page_preview", opts.disable_web_page_preview)
            .flag("protect_content", opts.protect_content)
            .flag("allow_sending_without_reply", opts.allow_sending_without_reply)
            .text("reply_markup", opts.reply_markup.as_str());

        self.call(Verb::Post, "sendMessage", action, form).await
    }

    /// Replace the text of a message.
    pub async fn edit_message_text(
        &self,
        target: &MessageTarget,
        text: &str,
        options: Option<&EditTextOptions>,
    ) -> Result<EditResponse, CourierError> {
        let defaults = EditTextOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = target
            .apply(Form::new())?
            .text("text", text)
            .text("parse_mode", ParseMode::resolve(opts.parse_mode))
            .entities("entities", &opts.entities)
            .flag("disable_web_page_preview", opts.disable_web_page_preview)
            .text("reply_markup", opts.reply_markup.as_str());

        self.call(Verb::Post, "editMessageText", "editing message text", form)
            .await
    }

    /// Replace the caption of a media message.
    pub async fn edit_message_caption(
        &self,
        target: &MessageTarget,
        options: Option<&EditCaptionOptions>,
    ) -> Result<EditResponse, CourierError> {
        let defaults = EditCaptionOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = target
            .apply(Form::new())?
            .text("caption", opts.caption.as_str())
            .text(
                "parse_mode",
                ParseMode::resolve_strict(options.is_some(), opts.parse_mode),
            )
            .entities("caption_entities", &opts.caption_entities)
            .text("reply_markup", opts.reply_markup.as_str());

        self.call(
            Verb::Post,
            "editMessageCaption",
            "editing message caption",
            form,
        )
        .await
    }

    /// Replace only the inline keyboard of a message. An empty markup removes it.
    pub async fn edit_message_reply_markup(
        &self,
        target: &MessageTarget,
        options: Option<&ReplyMarkupOptions>,
    ) -> Result<EditResponse, CourierError> {
        let reply_markup = options.map(|o| o.reply_markup.as_str()).unwrap_or("");
        let form = target
            .apply(Form::new())?
            .text("reply_markup", reply_markup);

        self.call(
            Verb::Post,
            "editMessageReplyMarkup",
            "editing message reply markup",
            form,
        )
        .await
    }

    /// Replace the animation, audio, document, photo or video of a message.
    pub async fn edit_message_media(
        &self,
        target: &MessageTarget,
        media: &InputMedia,
        options: Option<&ReplyMarkupOptions>,
    ) -> Result<EditResponse, CourierError> {
        let reply_markup = options.map(|o| o.reply_markup.as_str()).unwrap_or("");
        let form = target
            .apply(Form::new())?
            .json("media", media)
            .text("reply_markup", reply_markup);

        self.call(Verb::Post, "editMessageMedia", "editing message media", form)
            .await
    }

    pub async fn delete_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Result<DefaultResponse, CourierError> {
        let form = Form::new()
            .text("chat_id", chat_id.into().to_wire()?)
            .int("message_id", message_id);

        self.call(Verb::Post, "deleteMessage", "deleting message", form)
            .await
    }
}
