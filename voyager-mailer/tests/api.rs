use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use voyager_mailer::{BadgeEmail, MailError, Mailer, app};

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<BadgeEmail>>,
    fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &BadgeEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("relay refused".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/send-winner-badge")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn winner_badge_is_sent() {
    let mailer = Arc::new(RecordingMailer::default());
    let body = json!({"email": "ada@example.com", "userId": "u1", "name": "Ada"}).to_string();
    let res = app(mailer.clone()).oneshot(post(&body)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, json!({"success": true}));
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, "Congratulations — You completed all games!");
    assert!(sent[0].html.contains("Congratulations, Ada!"));
}

#[tokio::test]
async fn missing_email_is_a_bad_request() {
    let mailer = Arc::new(RecordingMailer::default());
    let res = app(mailer.clone())
        .oneshot(post(&json!({"userId": "u1"}).to_string()))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({"error": "Email is required"}));
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_body_is_a_bad_request() {
    let res = app(Arc::new(RecordingMailer::default()))
        .oneshot(post("not json"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delivery_failure_is_a_server_error() {
    let mailer = Arc::new(RecordingMailer {
        fail: true,
        ..RecordingMailer::default()
    });
    let res = app(mailer)
        .oneshot(post(&json!({"email": "ada@example.com"}).to_string()))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(res).await, json!({"error": "Email failed to send"}));
}

#[tokio::test]
async fn health_check_answers() {
    let res = app(Arc::new(RecordingMailer::default()))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
