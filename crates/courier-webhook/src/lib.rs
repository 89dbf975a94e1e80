//! # courier-webhook
//!
//! Inbound half of Courier. An axum middleware decodes each webhook delivery
//! into an [`Update`](courier_core::types::Update) and stores it in the
//! request extensions; the bundled router hands it to an [`UpdateHandler`].

pub mod handler;
pub mod middleware;
pub mod server;

pub use handler::{LoggingHandler, UpdateHandler};
pub use middleware::{decode_update, WebhookState, SECRET_TOKEN_HEADER};
pub use server::{build_router, serve};
