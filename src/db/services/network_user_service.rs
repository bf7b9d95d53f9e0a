use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::require_text;
use crate::db::entities::network_user;
use crate::stats::search::matches_search;
use crate::web::error::AppError;
use crate::web::models::network_models::{CreateNetworkUserRequest, UpdateNetworkUserRequest};

pub const DEFAULT_USER_TYPE: &str = "student";
pub const DEFAULT_USER_STATUS: &str = "active";

/// Newest first; search covers username, full name and email.
pub async fn list_network_users(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<network_user::Model>, AppError> {
    let users = network_user::Entity::find()
        .order_by_desc(network_user::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(users
        .into_iter()
        .filter(|u| {
            matches_search(
                search,
                &[Some(&u.username), Some(&u.full_name), u.email.as_deref()],
            )
        })
        .collect())
}

pub async fn get_network_user(
    db: &DatabaseConnection,
    network_user_id: Uuid,
) -> Result<network_user::Model, AppError> {
    network_user::Entity::find_by_id(network_user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Network user not found".to_string()))
}

pub async fn find_network_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<network_user::Model>, AppError> {
    Ok(network_user::Entity::find()
        .filter(network_user::Column::Username.eq(username))
        .one(db)
        .await?)
}

pub async fn create_network_user(
    db: &DatabaseConnection,
    payload: CreateNetworkUserRequest,
) -> Result<network_user::Model, AppError> {
    let new_user = network_user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(require_text(&payload.username, "username")?),
        full_name: Set(require_text(&payload.full_name, "full_name")?),
        email: Set(payload.email),
        department: Set(payload.department),
        user_type: Set(Some(
            payload
                .user_type
                .unwrap_or_else(|| DEFAULT_USER_TYPE.to_string()),
        )),
        status: Set(Some(
            payload
                .status
                .unwrap_or_else(|| DEFAULT_USER_STATUS.to_string()),
        )),
        default_zone_id: Set(payload.default_zone_id),
        total_bandwidth_used: Set(Some(0)),
        password_hash: Set(None),
        last_seen: Set(None),
        created_at: Set(Utc::now()),
    };

    let model = new_user.insert(db).await?;
    info!(network_user_id = %model.id, username = %model.username, "Network user created.");
    Ok(model)
}

pub async fn update_network_user(
    db: &DatabaseConnection,
    network_user_id: Uuid,
    payload: UpdateNetworkUserRequest,
) -> Result<network_user::Model, AppError> {
    let existing = get_network_user(db, network_user_id).await?;
    let mut active_user = existing.clone().into_active_model();

    if let Some(username) = payload.username {
        active_user.username = Set(require_text(&username, "username")?);
    }
    if let Some(full_name) = payload.full_name {
        active_user.full_name = Set(require_text(&full_name, "full_name")?);
    }
    if let Some(email) = payload.email {
        active_user.email = Set(email);
    }
    if let Some(department) = payload.department {
        active_user.department = Set(department);
    }
    if let Some(user_type) = payload.user_type {
        active_user.user_type = Set(Some(user_type));
    }
    if let Some(status) = payload.status {
        active_user.status = Set(Some(status));
    }
    if let Some(default_zone_id) = payload.default_zone_id {
        active_user.default_zone_id = Set(default_zone_id);
    }

    if !active_user.is_changed() {
        return Ok(existing);
    }
    Ok(active_user.update(db).await?)
}

pub async fn delete_network_user(
    db: &DatabaseConnection,
    network_user_id: Uuid,
) -> Result<(), AppError> {
    let existing = get_network_user(db, network_user_id).await?;
    existing.delete(db).await?;
    info!(network_user_id = %network_user_id, "Network user deleted.");
    Ok(())
}
