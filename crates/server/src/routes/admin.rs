use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// Reload the intent table from the intent store.
///
/// On failure the engine keeps serving from the previous snapshot and the
/// error is reported to the caller.
pub async fn reload_intents(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let engine = state.engine.clone();
    let count = tokio::task::spawn_blocking(move || engine.reload())
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    info!(intents = count, "intent table reloaded via admin endpoint");
    Ok(Json(json!({
        "status": "reloaded",
        "intents": count,
    })))
}
