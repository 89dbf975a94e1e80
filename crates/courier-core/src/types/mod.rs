//! Bot API schema types.
//!
//! Field names follow the platform's JSON. Scalars that the platform leaves
//! out decode as zero values; objects that may be absent are `Option`s.
//! Docs: <https://core.telegram.org/bots/api#available-types>

mod chat;
mod keyboard;
mod media;
mod message;
mod response;
mod update;

#[cfg(test)]
mod tests;

pub use chat::*;
pub use keyboard::*;
pub use media::*;
pub use message::*;
pub use response::*;
pub use update::*;

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}
