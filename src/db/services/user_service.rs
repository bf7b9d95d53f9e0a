//! Dashboard operator accounts and their roles.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::db::entities::{user, user_role};
use crate::db::enums::AppRole;
use crate::web::error::AppError;
use crate::web::models::UserResponse;

pub async fn find_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, AppError> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn get_user(db: &DatabaseConnection, user_id: Uuid) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Creates an account with its initial role: the very first account is an admin.
///
/// On Postgres the count and insert run serializable, so of two simultaneous first
/// signups one fails instead of both becoming admin. SQLite already serializes writers.
pub async fn create_user_with_role(
    db: &DatabaseConnection,
    email: &str,
    password_hash: String,
    full_name: &str,
    department: Option<String>,
) -> Result<(user::Model, AppRole), AppError> {
    let txn = match db.get_database_backend() {
        DbBackend::Postgres => {
            db.begin_with_config(Some(IsolationLevel::Serializable), None)
                .await?
        }
        _ => db.begin().await?,
    };
    let now = Utc::now();

    let role = if user::Entity::find().count(&txn).await? == 0 {
        AppRole::Admin
    } else {
        AppRole::User
    };

    let account = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        full_name: Set(full_name.to_string()),
        department: Set(department),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    user_role::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(account.id),
        role: Set(role),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(user_id = %account.id, email = %account.email, %role, "Account created.");
    Ok((account, role))
}

pub async fn roles_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<AppRole>, AppError> {
    let mut roles: Vec<AppRole> = user_role::Entity::find()
        .filter(user_role::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|r| r.role)
        .collect();
    roles.sort_by_key(|r| r.to_string());
    Ok(roles)
}

pub async fn has_role(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: AppRole,
) -> Result<bool, AppError> {
    Ok(user_role::Entity::find()
        .filter(user_role::Column::UserId.eq(user_id))
        .filter(user_role::Column::Role.eq(role))
        .count(db)
        .await?
        > 0)
}

/// Grants a role. Granting a role the user already holds is a conflict.
pub async fn assign_role(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: AppRole,
) -> Result<user_role::Model, AppError> {
    get_user(db, user_id).await?;
    if has_role(db, user_id, role).await? {
        return Err(AppError::Conflict(format!("User already has role '{role}'")));
    }

    let model = user_role::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        role: Set(role),
    }
    .insert(db)
    .await?;
    info!(user_id = %user_id, %role, "Role assigned.");
    Ok(model)
}

pub async fn list_users_with_roles(
    db: &DatabaseConnection,
) -> Result<Vec<UserResponse>, AppError> {
    let users = user::Entity::find()
        .order_by_asc(user::Column::CreatedAt)
        .all(db)
        .await?;

    let mut roles: HashMap<Uuid, Vec<AppRole>> = HashMap::new();
    for r in user_role::Entity::find().all(db).await? {
        roles.entry(r.user_id).or_default().push(r.role);
    }

    Ok(users
        .into_iter()
        .map(|u| UserResponse {
            roles: roles.remove(&u.id).unwrap_or_default(),
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            department: u.department,
        })
        .collect())
}
