use courier_core::chat_id::ChatId;
use courier_core::error::CourierError;
use courier_core::types::MessageResponse;

use crate::client::{BotClient, Verb};
use crate::form::Form;
use crate::options::{ParseMode, SendAnimationOptions, SendDocumentOptions, SendVideoOptions};

// `file` is a file id already on the platform or an HTTP URL it can fetch.

impl BotClient {
    pub async fn send_document(
        &self,
        chat_id: impl Into<ChatId>,
        file: &str,
        options: Option<&SendDocumentOptions>,
    ) -> Result<MessageResponse, CourierError> {
        let chat_id = chat_id.into().to_wire()?;
        let defaults = SendDocumentOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = Form::new()
            .text("chat_id", chat_id)
            .text("document", file)
            .text("thumb", opts.thumb.as_str())
            .text("caption", opts.caption.as_str())
            .text(
                "parse_mode",
                ParseMode::resolve_strict(options.is_some(), opts.parse_mode),
            )
            .entities("caption_entities", &opts.caption_entities)
            .flag(
                "disable_content_type_detection",
                opts.disable_content_type_detection,
            )
            .flag("disable_notification", opts.disable_notification)
            .flag("protect_content", opts.protect_content)
            .int("reply_to_message_id", opts.reply_to_message_id)
            .flag("allow_sending_without_reply", opts.allow_sending_without_reply)
            .text("reply_markup", opts.reply_markup.as_str());

        self.call(Verb::Post, "sendDocument", "sending document to chat", form)
            .await
    }

    pub async fn send_video(
        &self,
        chat_id: impl Into<ChatId>,
        file: &str,
        options: Option<&SendVideoOptions>,
    ) -> Result<MessageResponse, CourierError> {
        let chat_id = chat_id.into().to_wire()?;
        let defaults = SendVideoOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = Form::new()
            .text("chat_id", chat_id)
            .text("video", file)
            .int("duration", opts.duration)
            .int("width", opts.width)
            .int("height", opts.height)
            .text("thumb", opts.thumb.as_str())
            .text("caption", opts.caption.as_str())
            .text(
                "parse_mode",
                ParseMode::resolve_strict(options.is_some(), opts.parse_mode),
            )
            .entities("caption_entities", &opts.caption_entities)
            .flag("supports_streaming", opts.supports_streaming)
            .flag("disable_notification", opts.disable_notification)
            .flag("protect_content", opts.protect_content)
            .int("reply_to_message_id", opts.reply_to_message_id)
            .flag("allow_sending_without_reply", opts.allow_sending_without_reply)
            .text("reply_markup", opts.reply_markup.as_str());

        self.call(Verb::Post, "sendVideo", "sending video to chat", form)
            .await
    }

    /// Send a GIF or a silent H.264/MPEG-4 clip.
    pub async fn send_animation(
        &self,
        chat_id: impl Into<ChatId>,
        file: &str,
        options: Option<&SendAnimationOptions>,
    ) -> Result<MessageResponse, CourierError> {
        let chat_id = chat_id.into().to_wire()?;
        let defaults = SendAnimationOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = Form::new()
            .text("chat_id", chat_id)
            .text("animation", file)
            .int("duration", opts.duration)
            .int("width", opts.width)
            .int("height", opts.height)
            .text("thumb", opts.thumb.as_str())
            .text("caption", opts.caption.as_str())
            .text(
                "parse_mode",
                ParseMode::resolve_strict(options.is_some(), opts.parse_mode),
            )
            .entities("caption_entities", &opts.caption_entities)
            .flag("disable_notification", opts.disable_notification)
            .flag("protect_content", opts.protect_content)
            .int("reply_to_message_id", opts.reply_to_message_id)
            .flag("allow_sending_without_reply", opts.allow_sending_without_reply)
            .text("reply_markup", opts.reply_markup.as_str());

        self.call(
            Verb::Post,
            "sendAnimation",
            "sending animation to chat",
            form,
        )
        .await
    }
}
