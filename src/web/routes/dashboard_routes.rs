use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

use crate::db::services::{self, DashboardStats};
use crate::web::{AppError, AppState};

pub fn create_dashboard_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(dashboard_stats_handler))
}

async fn dashboard_stats_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(services::dashboard_stats(&app_state.db_pool).await?))
}
