//! Webhook HTTP server.

use axum::extract::{DefaultBodyLimit, Extension, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::{middleware, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

use courier_core::config::WebhookConfig;
use courier_core::error::CourierError;
use courier_core::logger::Logger;
use courier_core::types::Update;

use crate::handler::UpdateHandler;
use crate::middleware::{decode_update, WebhookState};

#[cfg(test)]
mod tests;

#[derive(Clone)]
struct AppState {
    handler: Arc<dyn UpdateHandler>,
}

async fn dispatch(
    State(app): State<AppState>,
    Extension(update): Extension<Arc<Update>>,
) -> StatusCode {
    app.handler.handle(update).await;
    StatusCode::OK
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Router with the webhook route on `config.path` and `GET /health`.
pub fn build_router(
    config: &WebhookConfig,
    logger: Arc<dyn Logger>,
    handler: Arc<dyn UpdateHandler>,
) -> Router {
    let webhook = WebhookState::new(logger, &config.secret_token, config.body_limit_bytes);
    Router::new()
        .route(&config.path, post(dispatch))
        .route_layer(middleware::from_fn_with_state(webhook, decode_update))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .with_state(AppState { handler })
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve(
    config: &WebhookConfig,
    logger: Arc<dyn Logger>,
    handler: Arc<dyn UpdateHandler>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), CourierError> {
    let app = build_router(config, logger, handler);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("webhook server listening on {addr}{}", config.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
