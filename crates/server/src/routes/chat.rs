use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tanya::{Responder, EMPTY_MESSAGE_PROMPT, UNMATCHED_REPLY};
use tracing::{debug, error};

use crate::state::ServerState;

/// Query string for the chat endpoint
#[derive(Debug, Deserialize)]
pub struct ChatParams {
    /// The user's message
    #[serde(default)]
    pub msg: String,
}

/// Wire format of a chat answer
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub score: f32,
    pub pattern: String,
}

/// Answer one chat message.
///
/// Empty or whitespace-only messages are short-circuited with a fixed
/// prompt; everything else goes through the engine. Store-backed matching
/// blocks, so the call runs on the blocking pool.
pub async fn get_bot_response(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ChatParams>,
) -> impl IntoResponse {
    let msg = params.msg.trim().to_string();
    if msg.is_empty() {
        return Json(ChatResponse {
            response: EMPTY_MESSAGE_PROMPT.to_string(),
            score: 0.0,
            pattern: String::new(),
        });
    }

    let engine = state.engine.clone();
    let query = msg.clone();
    let reply = match tokio::task::spawn_blocking(move || engine.respond(&query)).await {
        Ok(reply) => reply,
        Err(err) => {
            // A panicking matcher must never reach the user as anything but
            // the generic apology.
            error!(%err, "respond task failed");
            return Json(ChatResponse {
                response: UNMATCHED_REPLY.to_string(),
                score: 0.0,
                pattern: String::new(),
            });
        }
    };

    debug!(pattern = %reply.provenance, score = reply.score, user = %msg, "served reply");
    Json(ChatResponse {
        response: reply.response,
        score: reply.score,
        pattern: reply.provenance,
    })
}
