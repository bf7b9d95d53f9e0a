use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use crate::db::entities::bandwidth_log;
use crate::db::models::BandwidthLogWithZone;
use crate::db::services;
use crate::stats::bandwidth::BandwidthSummary;
use crate::web::models::network_models::{BandwidthQuery, CreateBandwidthLogRequest};
use crate::web::{AppError, AppState};

pub fn create_bandwidth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_bandwidth_logs_handler).post(add_bandwidth_log_handler),
        )
        .route("/summary", get(bandwidth_summary_handler))
        .route("/sample", post(generate_sample_data_handler))
}

async fn list_bandwidth_logs_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<BandwidthQuery>,
) -> Result<Json<Vec<BandwidthLogWithZone>>, AppError> {
    let logs = services::list_bandwidth_logs(&app_state.db_pool, query.zone_id).await?;
    Ok(Json(logs))
}

async fn add_bandwidth_log_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateBandwidthLogRequest>,
) -> Result<(StatusCode, Json<bandwidth_log::Model>), AppError> {
    let log = services::add_bandwidth_log(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn bandwidth_summary_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<BandwidthQuery>,
) -> Result<Json<BandwidthSummary>, AppError> {
    let summary = services::bandwidth_summary(&app_state.db_pool, query.zone_id).await?;
    Ok(Json(summary))
}

async fn generate_sample_data_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<bandwidth_log::Model>>), AppError> {
    let logs = services::generate_sample_data(&app_state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(logs)))
}
