//! HTTP handlers for the lecture summary API
//!
//! - POST /api/summaries      - generate and store a summary
//! - GET  /api/summaries      - list summaries (optional `subject` filter)
//! - GET  /api/summaries/:id  - fetch one summary

use crate::api::{bad_request, internal_error, not_found, ApiResponse};
use crate::engine::{Initializer, SummaryExtractor};
use crate::summaries::store::SummaryStore;
use crate::summaries::types::*;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

/// Shared state for summary handlers
#[derive(Clone)]
pub struct SummariesState {
    pub store: Arc<SummaryStore>,
    pub initializer: Arc<Initializer>,
}

/// Create the summaries router
pub fn summaries_router(state: SummariesState) -> Router {
    Router::new()
        .route("/api/summaries", get(list_summaries).post(create_summary))
        .route("/api/summaries/:id", get(get_summary))
        .with_state(state)
}

/// Generate a summary record from validated input
pub fn build_summary(input: &SummaryInput<'_>) -> LectureSummary {
    let now = Utc::now();
    let result = SummaryExtractor::extract(input.content);
    let file_attachment = input
        .file
        .map(|file| FileAttachment::from_upload(file, input.teacher_id, now));

    LectureSummary {
        id: uuid::Uuid::new_v4().to_string(),
        title: input.title.to_string(),
        original_content: input.content.to_string(),
        summary: result.summary,
        key_points: result.key_points,
        teacher_id: input.teacher_id.to_string(),
        institution_id: input.institution_id.to_string(),
        subject: input.subject.to_string(),
        created_at: now,
        updated_at: now,
        file_attachment,
    }
}

/// POST /api/summaries
async fn create_summary(
    State(state): State<SummariesState>,
    body: Result<Json<CreateSummaryRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::error!("Summary API error: {}", e);
            return internal_error();
        }
    };

    let Some(input) = request.validate() else {
        return bad_request("Missing required fields");
    };

    if let Err(e) = state.initializer.ensure_ready().await {
        tracing::error!("Summary API error: {}", e);
        return internal_error();
    }

    let summary = build_summary(&input);
    tracing::info!(
        id = %summary.id,
        subject = %summary.subject,
        key_points = summary.key_points.len(),
        "Lecture summary generated"
    );
    state.store.insert(summary.clone()).await;

    let body = ApiResponse::ok(summary, "Lecture summary generated successfully");
    (StatusCode::OK, Json(body)).into_response()
}

/// GET /api/summaries
async fn list_summaries(
    State(state): State<SummariesState>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let items = state.store.list(query.subject.as_deref()).await;
    let body = ApiResponse::ok(items, "Summaries retrieved successfully");
    (StatusCode::OK, Json(body)).into_response()
}

/// GET /api/summaries/:id
async fn get_summary(State(state): State<SummariesState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id).await {
        Some(summary) => {
            let body = ApiResponse::ok(summary, "Summary retrieved successfully");
            (StatusCode::OK, Json(body)).into_response()
        }
        None => not_found(format!("Summary '{}' not found", id)),
    }
}
