use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::wifi_session;
use crate::db::models::SessionWithDetails;
use crate::db::services;
use crate::web::models::SearchQuery;
use crate::web::models::session_models::{
    ConnectRequest, DisconnectRequest, UpdateSessionBandwidthRequest,
};
use crate::web::{AppError, AppState};

pub fn create_session_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_sessions_handler))
        .route("/active", get(list_active_sessions_handler))
        .route("/connect", post(connect_handler))
        .route("/{id}", get(get_session_handler))
        .route("/{id}/disconnect", post(disconnect_handler))
        .route("/{id}/bandwidth", put(update_bandwidth_handler))
}

async fn list_sessions_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SessionWithDetails>>, AppError> {
    let sessions = services::list_sessions(&app_state.db_pool, query.search.as_deref()).await?;
    Ok(Json(sessions))
}

async fn list_active_sessions_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SessionWithDetails>>, AppError> {
    let sessions =
        services::list_active_sessions(&app_state.db_pool, query.search.as_deref()).await?;
    Ok(Json(sessions))
}

async fn get_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<wifi_session::Model>, AppError> {
    Ok(Json(services::get_session(&app_state.db_pool, id).await?))
}

async fn connect_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<ConnectRequest>,
) -> Result<(StatusCode, Json<wifi_session::Model>), AppError> {
    let session = services::connect_session(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn disconnect_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: Option<Json<DisconnectRequest>>,
) -> Result<Json<wifi_session::Model>, AppError> {
    let Json(payload) = payload.unwrap_or_default();
    let session = services::disconnect_session(
        &app_state.db_pool,
        id,
        payload.bytes_downloaded,
        payload.bytes_uploaded,
    )
    .await?;
    Ok(Json(session))
}

async fn update_bandwidth_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSessionBandwidthRequest>,
) -> Result<Json<wifi_session::Model>, AppError> {
    let session = services::update_session_bandwidth(
        &app_state.db_pool,
        id,
        payload.bytes_downloaded,
        payload.bytes_uploaded,
    )
    .await?;
    Ok(Json(session))
}
