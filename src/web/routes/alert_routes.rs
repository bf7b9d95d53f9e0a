use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::intrusion_alert;
use crate::db::services::{self, AlertList};
use crate::web::models::network_models::{AlertQuery, CreateAlertRequest};
use crate::web::{AppError, AppState};

pub fn create_alert_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_alerts_handler).post(create_alert_handler))
        .route("/{id}/resolve", put(resolve_alert_handler))
}

async fn list_alerts_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<AlertList>, AppError> {
    let alerts =
        services::list_alerts_with_count(&app_state.db_pool, query.filter, query.search.as_deref())
            .await?;
    Ok(Json(alerts))
}

async fn create_alert_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<intrusion_alert::Model>), AppError> {
    let alert = services::create_alert(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

async fn resolve_alert_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<intrusion_alert::Model>, AppError> {
    Ok(Json(services::resolve_alert(&app_state.db_pool, id).await?))
}
