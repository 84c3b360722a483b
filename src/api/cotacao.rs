use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::app_state::models::AppState;
use crate::utils::deadline::Deadline;

/// `GET /cotacao`: current USD/BRL bid as `{"bid":"..."}`, or 500 with the error text.
pub async fn get_cotacao(Extension(app_state): Extension<Arc<AppState>>) -> Response {
    let request_id = Uuid::new_v4();
    let inbound = Deadline::after(app_state.settings.app_config.server.request_timeout());

    async move {
        match app_state.quote_service.fetch_and_store(&inbound).await {
            Ok(projection) => {
                info!(bid = %projection.bid, "Quote served");
                (StatusCode::OK, Json(projection)).into_response()
            }
            Err(err) => {
                error!(stage = %err.stage(), timeout = err.is_timeout(), "Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", err)).into_response()
            }
        }
    }
    .instrument(info_span!("cotacao", %request_id))
    .await
}
