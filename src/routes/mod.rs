// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::vnstat_repo::VnstatRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) vnstat_repo: Arc<VnstatRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(vnstat_repo: Arc<VnstatRepo>, config: AppConfig) -> Router {
    let state = AppState {
        vnstat_repo,
        config,
    };
    Router::new()
        .route("/", get(http::dashboard_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/stats", get(http::api_stats_handler)) // GET /api/stats
        .route("/api/history", get(http::api_history_handler)) // GET /api/history
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
