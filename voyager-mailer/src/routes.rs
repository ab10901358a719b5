use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::email::{WinnerBadgeRequest, render_badge_email};
use crate::mailer::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
}

pub fn app(mailer: Arc<dyn Mailer>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/send-winner-badge", post(send_winner_badge))
        .layer(CorsLayer::permissive())
        .with_state(AppState { mailer })
}

async fn health() -> &'static str {
    "ok"
}

async fn send_winner_badge(
    State(state): State<AppState>,
    payload: Option<Json<WinnerBadgeRequest>>,
) -> Response {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let Some(to) = request.recipient() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Email is required" })),
        )
            .into_response();
    };
    let email = render_badge_email(to, &request);
    match state.mailer.send(&email).await {
        Ok(()) => {
            log::info!(
                "winner badge sent to {to} (user {})",
                request.user_id.as_deref().unwrap_or("-")
            );
            Json(json!({ "success": true })).into_response()
        }
        Err(err) => {
            log::error!("winner badge for {to} failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Email failed to send" })),
            )
                .into_response()
        }
    }
}
