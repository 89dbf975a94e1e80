//! Keyboard markup builders.
//!
//! The bot API takes `reply_markup` as a JSON string inside the form, so each
//! builder returns that string ready to drop into an options struct.

use courier_core::types::{
    ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
    ReplyKeyboardRemove,
};

use crate::form::to_json;
use crate::options::ReplyKeyboardOptions;

/// Custom reply keyboard. Without options the keyboard is resized to fit.
pub fn reply_keyboard(
    rows: Vec<Vec<KeyboardButton>>,
    options: Option<&ReplyKeyboardOptions>,
) -> String {
    let markup = match options {
        None => ReplyKeyboardMarkup {
            keyboard: rows,
            resize_keyboard: true,
            ..Default::default()
        },
        Some(opts) => ReplyKeyboardMarkup {
            keyboard: rows,
            resize_keyboard: opts.resize_keyboard,
            one_time_keyboard: opts.one_time_keyboard,
            input_field_placeholder: opts.input_field_placeholder.clone(),
            selective: opts.selective,
        },
    };
    to_json(&markup)
}

/// A row of plain text buttons.
pub fn text_row<S: AsRef<str>>(labels: &[S]) -> Vec<KeyboardButton> {
    labels
        .iter()
        .map(|label| KeyboardButton::new(label.as_ref()))
        .collect()
}

/// Buttons attached to a message. Each button should carry exactly one
/// action; this is not checked here.
pub fn inline_keyboard(rows: Vec<Vec<InlineKeyboardButton>>) -> String {
    to_json(&InlineKeyboardMarkup {
        inline_keyboard: rows,
    })
}

pub fn remove_keyboard(remove: &ReplyKeyboardRemove) -> String {
    to_json(remove)
}

pub fn force_reply(reply: &ForceReply) -> String {
    to_json(reply)
}
