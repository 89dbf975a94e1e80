//! Downstream handling of decoded updates.

use async_trait::async_trait;
use std::sync::Arc;

use courier_core::logger::{LogFile, Logger};
use courier_core::types::{Update, UpdateKind};

/// Receives every update that passed decoding.
///
/// The platform may deliver the same update more than once; handlers see
/// each delivery.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, update: Arc<Update>);
}

/// Records every update to the operational log.
pub struct LoggingHandler {
    logger: Arc<dyn Logger>,
}

impl LoggingHandler {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl UpdateHandler for LoggingHandler {
    async fn handle(&self, update: Arc<Update>) {
        self.logger.log(&describe(&update), LogFile::Bot);
    }
}

/// One-line summary of an update for the bot log.
pub fn describe(update: &Update) -> String {
    let id = update.update_id;
    match update.kind() {
        UpdateKind::Message(m) => format!(
            "Received message {{ Update ID : {id}, Chat ID : {}, Message ID : {}, Text : {} }}",
            m.chat.id,
            m.message_id,
            m.text.as_deref().unwrap_or("")
        ),
        UpdateKind::EditedMessage(m) => format!(
            "Received edited message {{ Update ID : {id}, Chat ID : {}, Message ID : {} }}",
            m.chat.id, m.message_id
        ),
        UpdateKind::ChannelPost(m) => format!(
            "Received channel post {{ Update ID : {id}, Chat ID : {}, Message ID : {} }}",
            m.chat.id, m.message_id
        ),
        UpdateKind::EditedChannelPost(m) => format!(
            "Received edited channel post {{ Update ID : {id}, Chat ID : {}, Message ID : {} }}",
            m.chat.id, m.message_id
        ),
        UpdateKind::CallbackQuery(q) => format!(
            "Received callback query {{ Update ID : {id}, Query ID : {}, From : {}, Data : {} }}",
            q.id, q.from.id, q.data
        ),
        UpdateKind::Unknown => format!("Received unsupported update {{ Update ID : {id} }}"),
    }
}
