use axum::{
    Extension, Json, Router,
    extract::State,
    http::{Method, StatusCode},
    middleware as axum_middleware,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::server::config::ServerConfig;
use crate::services::auth_service;
use crate::web::{
    middleware::auth::{self, TOKEN_COOKIE},
    models::{AuthenticatedUser, LoginRequest, LoginResponse, SignupRequest, UserResponse},
    routes::*,
};

pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub config: Arc<ServerConfig>,
}

async fn signup_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = auth_service::signup(&app_state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let login_response =
        auth_service::login(&app_state.db_pool, payload, &app_state.config.jwt_secret).await?;
    info!(user_id = %login_response.user_id, "User logged in.");

    let auth_cookie = Cookie::build((TOKEN_COOKIE, login_response.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(true)
        .build();

    Ok((jar.add(auth_cookie), Json(login_response)))
}

async fn logout_handler(
    Extension(user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    info!(user_id = %user.id, "User logged out.");
    (
        jar.remove(Cookie::build(TOKEN_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(db_pool: DatabaseConnection, config: Arc<ServerConfig>) -> Router {
    let app_state = Arc::new(AppState { db_pool, config });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let require_auth = axum_middleware::from_fn_with_state(app_state.clone(), auth::auth);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login_handler))
        .route(
            "/api/auth/me",
            get(auth_service::me).route_layer(require_auth.clone()),
        )
        .route(
            "/api/auth/logout",
            post(logout_handler).route_layer(require_auth.clone()),
        )
        .nest("/api/portal", portal_routes::create_portal_router())
        .nest(
            "/api/zones",
            zone_routes::create_zone_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/network-users",
            network_user_routes::create_network_user_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/devices",
            device_routes::create_device_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/bandwidth",
            bandwidth_routes::create_bandwidth_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/alerts",
            alert_routes::create_alert_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/sessions",
            session_routes::create_session_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/usage",
            usage_routes::create_usage_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/dashboard",
            dashboard_routes::create_dashboard_router().route_layer(require_auth.clone()),
        )
        .nest(
            "/api/admin",
            admin_routes::create_admin_router()
                .route_layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    auth::require_admin,
                ))
                .route_layer(require_auth),
        )
        .with_state(app_state)
        .layer(cors)
}
