//! Public captive-portal endpoints; mounted without the auth layer.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::PortalZone;
use crate::db::services;
use crate::services::portal_service;
use crate::web::models::portal_models::{PortalConnectRequest, PortalSession};
use crate::web::{AppError, AppState};

pub fn create_portal_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/zones", get(portal_zones_handler))
        .route("/connect", post(portal_connect_handler))
        .route("/sessions/{id}", get(portal_session_handler))
        .route("/sessions/{id}/disconnect", post(portal_disconnect_handler))
}

async fn portal_zones_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<PortalZone>>, AppError> {
    Ok(Json(services::list_portal_zones(&app_state.db_pool).await?))
}

async fn portal_connect_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<PortalConnectRequest>,
) -> Result<(StatusCode, Json<PortalSession>), AppError> {
    let session = portal_service::portal_connect(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn portal_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PortalSession>, AppError> {
    Ok(Json(portal_service::portal_session(&app_state.db_pool, id).await?))
}

async fn portal_disconnect_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<PortalSession>, AppError> {
    Ok(Json(portal_service::portal_disconnect(&app_state.db_pool, id).await?))
}
