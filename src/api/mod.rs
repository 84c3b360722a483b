mod cotacao;
mod health_api;
mod health_db;

pub use cotacao::get_cotacao;
pub use health_api::health_api;
pub use health_db::health_db;

use crate::app_state::models::AppState;
use crate::layers::{create_cors, create_trace};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Builds the router with every endpoint and middleware
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cotacao", get(get_cotacao))
        .route("/api-health", get(health_api))
        .route("/db-health", get(health_db))
        .layer(axum::Extension(app_state))
        .layer(create_cors())
        .layer(create_trace())
}
