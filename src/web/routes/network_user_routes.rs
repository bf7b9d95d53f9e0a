use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::network_user;
use crate::db::models::SessionWithDetails;
use crate::db::services;
use crate::web::models::SearchQuery;
use crate::web::models::network_models::{CreateNetworkUserRequest, UpdateNetworkUserRequest};
use crate::web::{AppError, AppState};

pub fn create_network_user_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(list_network_users_handler).post(create_network_user_handler),
        )
        .route(
            "/{id}",
            get(get_network_user_handler)
                .put(update_network_user_handler)
                .delete(delete_network_user_handler),
        )
        .route("/{id}/sessions", get(list_user_sessions_handler))
}

async fn list_network_users_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<network_user::Model>>, AppError> {
    let users = services::list_network_users(&app_state.db_pool, query.search.as_deref()).await?;
    Ok(Json(users))
}

async fn get_network_user_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<network_user::Model>, AppError> {
    Ok(Json(services::get_network_user(&app_state.db_pool, id).await?))
}

async fn create_network_user_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateNetworkUserRequest>,
) -> Result<(StatusCode, Json<network_user::Model>), AppError> {
    let user = services::create_network_user(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_network_user_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNetworkUserRequest>,
) -> Result<Json<network_user::Model>, AppError> {
    let user = services::update_network_user(&app_state.db_pool, id, payload).await?;
    Ok(Json(user))
}

async fn delete_network_user_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    services::delete_network_user(&app_state.db_pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_user_sessions_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SessionWithDetails>>, AppError> {
    Ok(Json(services::list_user_sessions(&app_state.db_pool, id).await?))
}
