use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::entities::user_role;
use crate::db::services;
use crate::web::models::{AssignRoleRequest, UserResponse};
use crate::web::{AppError, AppState};

/// Account administration. Mounted behind both `auth` and `require_admin`.
pub fn create_admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{id}/roles", post(assign_role_handler))
}

async fn list_users_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    Ok(Json(services::list_users_with_roles(&app_state.db_pool).await?))
}

async fn assign_role_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRoleRequest>,
) -> Result<(StatusCode, Json<user_role::Model>), AppError> {
    let role = services::assign_role(&app_state.db_pool, id, payload.role).await?;
    Ok((StatusCode::CREATED, Json(role)))
}
