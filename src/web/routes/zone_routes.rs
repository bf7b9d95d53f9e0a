use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::zone;
use crate::db::models::ZoneWithUtilization;
use crate::db::services;
use crate::web::models::SearchQuery;
use crate::web::models::network_models::{CreateZoneRequest, UpdateZoneRequest};
use crate::web::{AppError, AppState};

pub fn create_zone_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_zones_handler).post(create_zone_handler))
        .route(
            "/{id}",
            get(get_zone_handler)
                .put(update_zone_handler)
                .delete(delete_zone_handler),
        )
}

async fn list_zones_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ZoneWithUtilization>>, AppError> {
    let zones = services::list_zones(&app_state.db_pool, query.search.as_deref()).await?;
    Ok(Json(zones))
}

async fn get_zone_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ZoneWithUtilization>, AppError> {
    let zone = services::get_zone(&app_state.db_pool, id).await?;
    Ok(Json(ZoneWithUtilization::from_model(zone)))
}

async fn create_zone_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateZoneRequest>,
) -> Result<(StatusCode, Json<zone::Model>), AppError> {
    let zone = services::create_zone(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(zone)))
}

async fn update_zone_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateZoneRequest>,
) -> Result<Json<zone::Model>, AppError> {
    let zone = services::update_zone(&app_state.db_pool, id, payload).await?;
    Ok(Json(zone))
}

async fn delete_zone_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    services::delete_zone(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
