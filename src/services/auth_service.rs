use axum::{Extension, Json, extract::State};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::warn;

use crate::db::entities::user;
use crate::db::services;
use crate::web::AppState;
use crate::web::error::AppError;
use crate::web::models::{
    AuthenticatedUser, Claims, LoginRequest, LoginResponse, SignupRequest, UserResponse,
};

pub const MIN_PASSWORD_LENGTH: usize = 8;
const TOKEN_LIFETIME_HOURS: i64 = 24;

pub async fn signup(
    db: &DatabaseConnection,
    req: SignupRequest,
) -> Result<UserResponse, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "Email is required and the password needs at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }
    let full_name = req.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::InvalidInput("Full name is required.".to_string()));
    }

    if services::find_user_by_email(db, email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered.".to_string()));
    }

    let password_hash = hash(&req.password, DEFAULT_COST)
        .map_err(|e| AppError::PasswordHashingError(e.to_string()))?;

    let (account, role) =
        services::create_user_with_role(db, email, password_hash, full_name, req.department)
            .await?;

    Ok(UserResponse {
        id: account.id,
        email: account.email,
        full_name: account.full_name,
        department: account.department,
        roles: vec![role],
    })
}

pub async fn login(
    db: &DatabaseConnection,
    req: LoginRequest,
    jwt_secret: &str,
) -> Result<LoginResponse, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password are required.".to_string(),
        ));
    }

    let account = services::find_user_by_email(db, req.email.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let valid_password = verify(&req.password, &account.password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {e}")))?;

    if !valid_password {
        warn!(email = %account.email, "Rejected login with a wrong password.");
        return Err(AppError::InvalidCredentials);
    }

    create_jwt_for_user(&account, jwt_secret)
}

pub fn create_jwt_for_user(account: &user::Model, jwt_secret: &str) -> Result<LoginResponse, AppError> {
    let expiration = (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize;

    let claims = Claims {
        sub: account.email.clone(),
        user_id: account.id,
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::TokenCreationError(e.to_string()))?;

    Ok(LoginResponse {
        token,
        user_id: account.id,
        email: account.email.clone(),
    })
}

pub async fn me(
    State(app_state): State<Arc<AppState>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> Result<Json<UserResponse>, AppError> {
    let account = services::get_user(&app_state.db_pool, current.id).await?;
    let roles = services::roles_for_user(&app_state.db_pool, account.id).await?;

    Ok(Json(UserResponse {
        id: account.id,
        email: account.email,
        full_name: account.full_name,
        department: account.department,
        roles,
    }))
}
