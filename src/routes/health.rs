use crate::states::AppState;
use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::json;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "uptime": state.started_at.elapsed().as_secs(),
        "environment": std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_owned()),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/status
pub async fn api_status() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Clickereen API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "features": [
            "Posts Management",
            "User Authentication",
            "Notifications",
            "Analytics Dashboard",
            "Live Streaming",
            "Search & Discovery",
            "Media Processing"
        ],
    }))
}
