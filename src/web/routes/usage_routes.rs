use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use std::sync::Arc;

use crate::db::services;
use crate::stats::usage::{UsageOverview, UserUsageStats};
use crate::web::models::SearchQuery;
use crate::web::{AppError, AppState};

pub fn create_usage_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(user_usage_stats_handler))
        .route("/overview", get(usage_overview_handler))
}

async fn user_usage_stats_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<UserUsageStats>>, AppError> {
    let stats = services::user_usage_stats(&app_state.db_pool, query.search.as_deref()).await?;
    Ok(Json(stats))
}

async fn usage_overview_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<UsageOverview>, AppError> {
    Ok(Json(services::usage_overview(&app_state.db_pool).await?))
}
