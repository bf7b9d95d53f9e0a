use axum::{
    body::Body as AxumBody,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::db::enums::AppRole;
use crate::db::services;
use crate::web::models::{AuthenticatedUser, Claims};
use crate::web::{AppState, error::AppError};

pub const TOKEN_COOKIE: &str = "token";

/// A `Bearer` Authorization header wins over the login cookie.
fn request_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match bearer {
        Some(token) => Some(token.to_string()),
        None => jar.get(TOKEN_COOKIE).map(|cookie| cookie.value().to_string()),
    }
}

pub fn verify_token(token: &str, jwt_secret: &str) -> Result<AuthenticatedUser, AppError> {
    let key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let claims = decode::<Claims>(token, &key, &Validation::default())
        .map_err(|e| {
            warn!(error = %e, "Rejected JWT.");
            AppError::InvalidCredentials
        })?
        .claims;

    Ok(AuthenticatedUser {
        id: claims.user_id,
        email: claims.sub,
    })
}

/// Resolves the caller from its JWT and stores an [`AuthenticatedUser`] extension.
pub async fn auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request<AxumBody>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = request_token(req.headers(), &jar) else {
        debug!(path = %req.uri().path(), "Request without credentials.");
        return Err(AppError::InvalidCredentials);
    };

    let user = verify_token(&token, &state.config.jwt_secret)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Must run after [`auth`]; lets only admins through.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request<AxumBody>,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if !services::has_role(&state.db_pool, user.id, AppRole::Admin).await? {
        warn!(user_id = %user.id, "Non-admin attempted an admin operation.");
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::user;
    use crate::services::auth_service::create_jwt_for_user;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, "from-cookie"));

        assert_eq!(request_token(&headers, &jar).as_deref(), Some("from-header"));
        assert_eq!(
            request_token(&HeaderMap::new(), &jar).as_deref(),
            Some("from-cookie")
        );
        assert_eq!(request_token(&HeaderMap::new(), &CookieJar::new()), None);
    }

    #[test]
    fn test_verify_token_checks_secret() {
        let now = Utc::now();
        let account = user::Model {
            id: Uuid::new_v4(),
            email: "ops@campus.edu".to_string(),
            password_hash: String::new(),
            full_name: "Ops".to_string(),
            department: None,
            created_at: now,
            updated_at: now,
        };
        let login = create_jwt_for_user(&account, "secret-a").unwrap();

        let user = verify_token(&login.token, "secret-a").unwrap();
        assert_eq!(user.id, account.id);
        assert_eq!(user.email, "ops@campus.edu");
        assert!(matches!(
            verify_token(&login.token, "secret-b"),
            Err(AppError::InvalidCredentials)
        ));
    }
}
