pub mod admin;
pub mod chat;
pub mod health;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Service information served at `/`
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "service": "tanya-server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "chat": "GET /get?msg=...",
            "reload": "POST /api/v1/reload",
            "health": "GET /health",
        }
    }))
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "code": "NOT_FOUND",
                "message": "Not found",
            }
        })),
    )
}
