//! Bot API operations, grouped by what they act on. Each file adds methods to
//! [`crate::BotClient`].

mod callback;
mod chats;
mod invite_links;
mod media;
mod members;
mod messages;
