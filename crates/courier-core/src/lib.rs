//! # courier-core
//!
//! Core types, configuration, logging and error handling for Courier.

pub mod chat_id;
pub mod config;
pub mod error;
pub mod logger;
pub mod types;
