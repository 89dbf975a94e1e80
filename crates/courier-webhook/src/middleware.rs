//! Update-decoding middleware.
//!
//! Use with `axum::middleware::from_fn_with_state(state, decode_update)`.
//! Downstream handlers read the update with `Extension<Arc<Update>>`.

use axum::body::{self, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, warn};

use courier_core::logger::{LogFile, Logger};
use courier_core::types::Update;

/// Header the platform echoes the webhook secret in.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state for [`decode_update`].
#[derive(Clone)]
pub struct WebhookState {
    logger: Arc<dyn Logger>,
    secret_token: Option<String>,
    body_limit: usize,
}

impl WebhookState {
    /// An empty `secret_token` disables the header check.
    pub fn new(logger: Arc<dyn Logger>, secret_token: &str, body_limit: usize) -> Self {
        let secret_token = if secret_token.is_empty() {
            None
        } else {
            Some(secret_token.to_string())
        };
        Self {
            logger,
            secret_token,
            body_limit,
        }
    }
}

/// Constant-time string comparison so the secret cannot be guessed by timing.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

fn secret_matches(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|token| constant_time_eq(token, expected))
}

/// Decode the body into an [`Update`] and pass it on.
///
/// A body that does not decode is logged once to the error log and dropped:
/// the delivery is answered `200 OK` without calling the next handler, so the
/// platform does not redeliver it.
pub async fn decode_update(
    State(state): State<WebhookState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &state.secret_token {
        if !secret_matches(request.headers(), expected) {
            warn!("webhook delivery rejected: bad secret token");
            state.logger.log(
                "Error: Webhook delivery rejected, secret token mismatch",
                LogFile::Error,
            );
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match body::to_bytes(body, state.body_limit).await {
        Ok(b) => b,
        Err(e) => {
            state.logger.log(
                &format!("Error: Unable to read webhook body, {e}"),
                LogFile::Error,
            );
            return StatusCode::OK.into_response();
        }
    };

    let update: Update = match serde_json::from_slice(&bytes) {
        Ok(u) => u,
        Err(e) => {
            state.logger.log(
                &format!("Error: Unable to parse webhook update, {e}"),
                LogFile::Error,
            );
            return StatusCode::OK.into_response();
        }
    };

    debug!(update_id = update.update_id, "webhook update decoded");
    parts.extensions.insert(Arc::new(update));
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secret1"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_secret_header_lookup() {
        let mut headers = HeaderMap::new();
        assert!(!secret_matches(&headers, "s3"));
        headers.insert(SECRET_TOKEN_HEADER, "s3".parse().unwrap());
        assert!(secret_matches(&headers, "s3"));
        assert!(!secret_matches(&headers, "s4"));
    }
}
