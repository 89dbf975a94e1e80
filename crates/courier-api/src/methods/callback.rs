use courier_core::error::CourierError;
use courier_core::types::DefaultResponse;

use crate::client::{BotClient, Verb};
use crate::form::Form;
use crate::options::AnswerCallbackOptions;

impl BotClient {
    /// Acknowledge an inline button press. Each query must be answered once,
    /// even with no text, or the client keeps showing a progress indicator.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        options: Option<&AnswerCallbackOptions>,
    ) -> Result<DefaultResponse, CourierError> {
        if callback_query_id.is_empty() {
            return Err(CourierError::InvalidArgument(
                "callback query id must not be empty".into(),
            ));
        }
        let defaults = AnswerCallbackOptions::default();
        let opts = options.unwrap_or(&defaults);

        let form = Form::new()
            .text("callback_query_id", callback_query_id)
            .text("text", opts.text.as_str())
            .flag("show_alert", opts.show_alert)
            .text("url", opts.url.as_str())
            .int("cache_time", opts.cache_time);

        self.call(
            Verb::Post,
            "answerCallbackQuery",
            "answering callback query",
            form,
        )
        .await
    }
}
