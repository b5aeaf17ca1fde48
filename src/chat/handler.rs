//! HTTP handler for the chat API
//!
//! - POST /api/chat - answer a student message

use crate::api::{bad_request, internal_error, ApiResponse};
use crate::chat::service::ChatService;
use crate::chat::types::{ChatMessage, ChatRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared state for chat handlers
#[derive(Clone)]
pub struct ChatState {
    pub service: Arc<ChatService>,
    /// Cancelled on server shutdown; in-flight upstream calls are abandoned
    pub shutdown: CancellationToken,
}

/// Create the chat router
pub fn chat_router(state: ChatState) -> Router {
    Router::new()
        .route("/api/chat", post(post_chat))
        .with_state(state)
}

/// POST /api/chat
async fn post_chat(
    State(state): State<ChatState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::error!("Chat API error: {}", e);
            return internal_error();
        }
    };

    let Some((message, session_id, user_id)) = request.required_fields() else {
        return bad_request("Missing required fields");
    };

    tracing::debug!(session_id, user_id, "Chat request");
    let reply = state
        .service
        .respond_with_cancel(message, &state.shutdown)
        .await;

    let data = ChatMessage::assistant(reply.content, session_id);
    let body = ApiResponse::ok(data, "AI response generated successfully").with_source(reply.source);
    (StatusCode::OK, Json(body)).into_response()
}
