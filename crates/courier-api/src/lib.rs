//! # courier-api
//!
//! Outbound half of Courier: one async method per bot API operation on
//! [`BotClient`], per-operation option structs, and keyboard markup builders.

pub mod client;
pub mod form;
pub mod keyboard;
mod methods;
pub mod options;

pub use client::BotClient;
pub use options::*;
