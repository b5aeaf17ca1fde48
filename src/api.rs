//! Unified API router for Classmate
//!
//! Merges all module routers into a single axum `Router` with CORS,
//! request tracing, a shared response envelope and a shared application
//! state.
//!
//! ## Endpoint Map
//!
//! | Prefix            | Module    | Description                       |
//! |-------------------|-----------|-----------------------------------|
//! | `/health`         | api       | Health probe                      |
//! | `/api/chat`       | chat      | Assistant replies                 |
//! | `/api/summaries*` | summaries | Lecture summary generation, list  |
//! | `/api/reminders*` | reminders | Reminder list, create, toggle     |

use crate::chat::{chat_router, ChatService, ChatState};
use crate::config::ClassmateConfig;
use crate::engine::Initializer;
use crate::error::Result;
use crate::reminders::{reminders_router, ReminderStore, RemindersState};
use crate::summaries::{summaries_router, SummariesState, SummaryStore};
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Response envelope shared by every `/api` endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Attach the label of the path that produced the data
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
            source: None,
        }
    }
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ApiResponse::failure(error))).into_response()
}

/// 400 with a `{ success: false, error }` body
pub fn bad_request(error: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, error)
}

/// 404 with a `{ success: false, error }` body
pub fn not_found(error: impl Into<String>) -> Response {
    error_response(StatusCode::NOT_FOUND, error)
}

/// Generic 500; details stay in the logs
pub fn internal_error() -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Combined application state holding references to all subsystems
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub summaries: Arc<SummaryStore>,
    pub reminders: Arc<ReminderStore>,
    pub initializer: Arc<Initializer>,
    /// Cancelled when the server shuts down
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build the application state from configuration, with sample data
    /// loaded into the stores
    pub fn from_config(config: &ClassmateConfig) -> Result<Self> {
        let initializer = Arc::new(Initializer::simulated(config.engine.warmup_delay()));
        let chat = ChatService::from_config(config, initializer.clone())?;

        Ok(Self {
            chat: Arc::new(chat),
            summaries: Arc::new(SummaryStore::with_samples()),
            reminders: Arc::new(ReminderStore::with_samples()),
            initializer,
            shutdown: CancellationToken::new(),
        })
    }
}

/// Build the complete Classmate HTTP application
///
/// Merges all module routers, adds request tracing and CORS middleware, and
/// returns a single `Router` ready to be served by `axum::serve`.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let cors = build_cors(cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .merge(chat_router(ChatState {
            service: state.chat,
            shutdown: state.shutdown,
        }))
        .merge(summaries_router(SummariesState {
            store: state.summaries,
            initializer: state.initializer,
        }))
        .merge(reminders_router(RemindersState {
            store: state.reminders,
        }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(parsed)
    }
}
