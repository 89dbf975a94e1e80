use super::*;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use std::sync::Mutex;
use tower::ServiceExt;

use courier_core::logger::{LogFile, MemoryLogger};
use courier_core::types::UpdateKind;

use crate::handler::LoggingHandler;
use crate::middleware::SECRET_TOKEN_HEADER;

/// Handler that remembers every update it was given.
#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<Arc<Update>>>,
}

impl Recorder {
    fn seen(&self) -> Vec<Arc<Update>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpdateHandler for Recorder {
    async fn handle(&self, update: Arc<Update>) {
        self.seen.lock().unwrap().push(update);
    }
}

fn config(secret: &str) -> WebhookConfig {
    WebhookConfig {
        path: "/hook".into(),
        secret_token: secret.into(),
        ..Default::default()
    }
}

fn router(secret: &str) -> (Router, Arc<Recorder>, Arc<MemoryLogger>) {
    let recorder = Arc::new(Recorder::default());
    let logger = Arc::new(MemoryLogger::new());
    let app = build_router(&config(secret), logger.clone(), recorder.clone());
    (app, recorder, logger)
}

fn delivery(body: &str) -> Request<Body> {
    Request::post("/hook")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const CALLBACK_ONLY: &str = r#"{
    "update_id": 900,
    "callback_query": {
        "id": "q-1",
        "from": {"id": 5, "is_bot": false, "first_name": "Eve"},
        "chat_instance": "ci-1",
        "data": "page:2"
    }
}"#;

#[tokio::test]
async fn test_callback_only_update_reaches_handler() {
    let (app, recorder, logger) = router("");
    let resp = app.oneshot(delivery(CALLBACK_ONLY)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let seen = recorder.seen();
    assert_eq!(seen.len(), 1);
    let update = &seen[0];
    assert_eq!(update.update_id, 900);
    assert!(update.message.is_none());
    assert!(update.edited_message.is_none());
    assert!(update.channel_post.is_none());
    assert!(update.edited_channel_post.is_none());
    match update.kind() {
        UpdateKind::CallbackQuery(q) => {
            assert_eq!(q.id, "q-1");
            assert_eq!(q.data, "page:2");
            assert!(q.message.is_none());
        }
        other => panic!("expected callback query, got {other:?}"),
    }
    assert!(logger.lines(LogFile::Error).is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_dropped_with_one_error_log() {
    let (app, recorder, logger) = router("");
    let resp = app
        .oneshot(delivery(r#"{"update_id": "not a number""#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
    assert!(recorder.seen().is_empty());

    let errors = logger.lines(LogFile::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Unable to parse webhook update"));
    assert_eq!(logger.entries().len(), 1);
}

#[tokio::test]
async fn test_wrong_shape_is_dropped() {
    let (app, recorder, logger) = router("");
    let resp = app.oneshot(delivery("[1, 2, 3]")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(recorder.seen().is_empty());
    assert_eq!(logger.lines(LogFile::Error).len(), 1);
}

#[tokio::test]
async fn test_duplicate_deliveries_pass_through() {
    let (app, recorder, _) = router("");
    for _ in 0..2 {
        let resp = app.clone().oneshot(delivery(CALLBACK_ONLY)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let seen = recorder.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
}

#[tokio::test]
async fn test_secret_token_mismatch_is_unauthorized() {
    let (app, recorder, logger) = router("s3cret");

    let missing = app.clone().oneshot(delivery(CALLBACK_ONLY)).await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = Request::post("/hook")
        .header(SECRET_TOKEN_HEADER, "guess")
        .body(Body::from(CALLBACK_ONLY))
        .unwrap();
    let resp = app.clone().oneshot(wrong).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(recorder.seen().is_empty());
    assert_eq!(logger.lines(LogFile::Error).len(), 2);

    let right = Request::post("/hook")
        .header("X-Telegram-Bot-Api-Secret-Token", "s3cret")
        .body(Body::from(CALLBACK_ONLY))
        .unwrap();
    let resp = app.oneshot(right).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(recorder.seen().len(), 1);
}

#[tokio::test]
async fn test_health_is_not_decoded() {
    let (app, recorder, logger) = router("s3cret");
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(recorder.seen().is_empty());
    assert!(logger.entries().is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (app, _, _) = router("");
    let req = Request::post("/elsewhere")
        .body(Body::from(CALLBACK_ONLY))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_middleware_on_custom_router_keeps_body() {
    // Downstream handlers can read both the decoded update and the raw body.
    async fn echo(Extension(update): Extension<Arc<Update>>, body: String) -> String {
        format!("{}|{}", update.update_id, body.len())
    }

    let logger: Arc<dyn Logger> = Arc::new(MemoryLogger::new());
    let state = WebhookState::new(logger, "", 1024);
    let app: Router = Router::new()
        .route("/custom", post(echo))
        .layer(middleware::from_fn_with_state(state, decode_update));

    let req = Request::post("/custom")
        .body(Body::from(CALLBACK_ONLY))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        format!("900|{}", CALLBACK_ONLY.len())
    );
}

#[tokio::test]
async fn test_logging_handler_records_update() {
    let logger = Arc::new(MemoryLogger::new());
    let handler = Arc::new(LoggingHandler::new(logger.clone()));
    let app = build_router(&config(""), logger.clone(), handler);

    let resp = app
        .oneshot(delivery(
            r#"{"update_id": 3, "message": {"message_id": 8, "chat": {"id": 12, "type": "private"}, "text": "hey"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bot = logger.lines(LogFile::Bot);
    assert_eq!(bot.len(), 1);
    assert_eq!(
        bot[0],
        "Received message { Update ID : 3, Chat ID : 12, Message ID : 8, Text : hey }"
    );
}
