//! # Web Module
//!
//! Thin HTTP adapter over [`SentimentService`]: one route per tab plus a
//! small JSON API.

mod assets;
mod handlers;
mod pages;

pub use assets::{fetch_animations, Animations};
pub use handlers::ApiError;
pub use pages::{escape_html, Tab};

use crate::service::SentimentService;
use crate::utils::AppConfig;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use pages::Chrome;
use std::sync::Arc;
use tracing::info;

/// Read-only state shared by all handlers
#[derive(Debug)]
pub struct AppState {
    pub service: SentimentService,
    pub config: AppConfig,
    pub animations: Animations,
}

impl AppState {
    pub fn new(service: SentimentService, config: AppConfig, animations: Animations) -> Self {
        Self {
            service,
            config,
            animations,
        }
    }

    fn chrome(&self) -> Chrome<'_> {
        Chrome {
            title: &self.config.server.title,
            animations: &self.animations,
        }
    }
}

pub type SharedState = Arc<AppState>;

/// Build the router with every tab and API route
pub fn create_router(state: SharedState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::home))
        .route("/analyzer", get(handlers::analyzer_page))
        .route("/analyzer/text", post(handlers::analyze_text))
        .route("/analyzer/file", post(handlers::analyze_file))
        .route("/dashboard", get(handlers::dashboard_page).post(handlers::dashboard_upload))
        .route("/team", get(handlers::team_page))
        .route("/team/:index/photo", get(handlers::team_photo))
        .route("/info", get(handlers::info_page))
        .route("/feedback", get(handlers::feedback_page).post(handlers::submit_feedback))
        .route("/feedback/rating", post(handlers::submit_rating))
        .route("/api/analyze", post(handlers::api_analyze))
        .route("/api/batch", post(handlers::api_batch))
        .route("/api/dashboard", post(handlers::api_dashboard))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(state: SharedState, bind: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, create_router(state)).await
}
