//! HTTP handlers for the reminders API
//!
//! - GET  /api/reminders             - list reminders (optional `status`)
//! - POST /api/reminders             - create a reminder
//! - GET  /api/reminders/stats       - counts by status
//! - POST /api/reminders/:id/toggle  - flip completion

use crate::api::{bad_request, internal_error, not_found, ApiResponse};
use crate::error::Error;
use crate::reminders::store::ReminderStore;
use crate::reminders::types::*;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

/// Shared state for reminder handlers
#[derive(Clone)]
pub struct RemindersState {
    pub store: Arc<ReminderStore>,
}

/// Create the reminders router
pub fn reminders_router(state: RemindersState) -> Router {
    Router::new()
        .route("/api/reminders", get(list_reminders).post(create_reminder))
        .route("/api/reminders/stats", get(reminder_stats))
        .route("/api/reminders/:id/toggle", post(toggle_reminder))
        .with_state(state)
}

/// GET /api/reminders
async fn list_reminders(
    State(state): State<RemindersState>,
    query: Result<Query<ReminderQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return bad_request("Invalid status filter");
    };

    let items = state.store.list(query.status, Utc::now()).await;
    (StatusCode::OK, Json(ApiResponse::ok(items, "Reminders retrieved successfully"))).into_response()
}

/// POST /api/reminders
async fn create_reminder(
    State(state): State<RemindersState>,
    body: Result<Json<CreateReminderRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::error!("Reminder API error: {}", e);
            return internal_error();
        }
    };

    match request.into_reminder(Utc::now()) {
        Ok(reminder) => {
            tracing::info!(id = %reminder.id, due = %reminder.due_date, "Reminder created");
            state.store.insert(reminder.clone()).await;
            (StatusCode::OK, Json(ApiResponse::ok(reminder, "Reminder created successfully")))
                .into_response()
        }
        Err(Error::Validation(msg)) => bad_request(msg),
        Err(e) => {
            tracing::error!("Reminder API error: {}", e);
            internal_error()
        }
    }
}

/// GET /api/reminders/stats
async fn reminder_stats(State(state): State<RemindersState>) -> Response {
    let stats = state.store.stats(Utc::now()).await;
    (StatusCode::OK, Json(ApiResponse::ok(stats, "Reminder stats retrieved successfully"))).into_response()
}

/// POST /api/reminders/:id/toggle
async fn toggle_reminder(State(state): State<RemindersState>, Path(id): Path<String>) -> Response {
    match state.store.toggle(&id, Utc::now()).await {
        Some(reminder) => {
            (StatusCode::OK, Json(ApiResponse::ok(reminder, "Reminder updated successfully")))
                .into_response()
        }
        None => not_found(format!("Reminder '{}' not found", id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_state() -> RemindersState {
        RemindersState {
            store: Arc::new(ReminderStore::with_samples()),
        }
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_all() {
        let resp = reminders_router(test_state())
            .oneshot(Request::get("/api/reminders").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_list_completed() {
        let resp = reminders_router(test_state())
            .oneshot(
                Request::get("/api/reminders?status=completed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(resp).await;
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "Literature Essay Submission");
    }

    #[tokio::test]
    async fn test_invalid_status() {
        let resp = reminders_router(test_state())
            .oneshot(
                Request::get("/api/reminders?status=someday")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_and_stats() {
        let state = test_state();
        let resp = reminders_router(state.clone())
            .oneshot(post_json(
                "/api/reminders",
                serde_json::json!({
                    "title": "Chemistry quiz",
                    "dueDate": "2999-01-01",
                    "type": "exam",
                    "priority": "high"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["type"], "exam");
        assert_eq!(json["data"]["completed"], false);

        let resp = reminders_router(state)
            .oneshot(Request::get("/api/reminders/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(resp).await;
        // samples are all in the past; the new one is far in the future
        assert_eq!(json["data"]["total"], 5);
        assert_eq!(json["data"]["completed"], 1);
        assert_eq!(json["data"]["overdue"], 3);
        assert_eq!(json["data"]["upcoming"], 1);
    }

    #[tokio::test]
    async fn test_create_missing_due_date() {
        let resp = reminders_router(test_state())
            .oneshot(post_json("/api/reminders", serde_json::json!({ "title": "No date" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_toggle() {
        let state = test_state();
        let resp = reminders_router(state.clone())
            .oneshot(post_json("/api/reminders/1/toggle", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["data"]["completed"], true);

        let resp = reminders_router(state)
            .oneshot(post_json("/api/reminders/unknown/toggle", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
    }
}
