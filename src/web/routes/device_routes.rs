use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::device;
use crate::db::models::DeviceWithOwner;
use crate::db::services;
use crate::web::models::SearchQuery;
use crate::web::models::network_models::{CreateDeviceRequest, UpdateDeviceRequest};
use crate::web::{AppError, AppState};

pub fn create_device_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_devices_handler).post(create_device_handler))
        .route(
            "/{id}",
            get(get_device_handler)
                .put(update_device_handler)
                .delete(delete_device_handler),
        )
}

async fn list_devices_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DeviceWithOwner>>, AppError> {
    let devices = services::list_devices(&app_state.db_pool, query.search.as_deref(), None).await?;
    Ok(Json(devices))
}

async fn get_device_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<device::Model>, AppError> {
    Ok(Json(services::get_device(&app_state.db_pool, id).await?))
}

async fn create_device_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<device::Model>), AppError> {
    let device = services::create_device(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

async fn update_device_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDeviceRequest>,
) -> Result<Json<device::Model>, AppError> {
    let device = services::update_device(&app_state.db_pool, id, payload).await?;
    Ok(Json(device))
}

async fn delete_device_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    services::delete_device(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
