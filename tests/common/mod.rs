//! Shared fixtures: an in-memory SQLite database migrated by the application's migrator,
//! plus seed helpers for the campus network tables.

use campusnet::db;
use campusnet::db::entities::{device, network_user, zone};
use campusnet::db::services;
use campusnet::server::config::ServerConfig;
use campusnet::web::models::network_models::{
    CreateDeviceRequest, CreateNetworkUserRequest, CreateZoneRequest,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// One connection only: every SQLite in-memory connection is its own database.
#[allow(dead_code)]
pub async fn setup_db() -> DatabaseConnection {
    db::connect_and_migrate("sqlite::memory:", 1)
        .await
        .expect("in-memory database should migrate")
}

#[allow(dead_code)]
pub fn test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_dir: "logs".to_string(),
        zone_sync_interval_seconds: 60,
        max_db_connections: 1,
    })
}

#[allow(dead_code)]
pub async fn seed_zone(db: &DatabaseConnection, name: &str) -> zone::Model {
    services::create_zone(
        db,
        CreateZoneRequest {
            name: name.to_string(),
            location: format!("{name} Building"),
            ap_count: None,
            max_capacity: None,
            status: None,
        },
    )
    .await
    .expect("zone should be created")
}

#[allow(dead_code)]
pub async fn seed_network_user(
    db: &DatabaseConnection,
    username: &str,
    full_name: &str,
) -> network_user::Model {
    services::create_network_user(
        db,
        CreateNetworkUserRequest {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: Some(format!("{username}@campus.edu")),
            department: Some("Computer Science".to_string()),
            user_type: None,
            status: None,
            default_zone_id: None,
        },
    )
    .await
    .expect("network user should be created")
}

#[allow(dead_code)]
pub async fn seed_device(
    db: &DatabaseConnection,
    mac_address: &str,
    owner: Option<&network_user::Model>,
    zone: Option<&zone::Model>,
) -> device::Model {
    services::create_device(
        db,
        CreateDeviceRequest {
            mac_address: mac_address.to_string(),
            ip_address: Some("10.0.0.12".to_string()),
            device_name: Some(format!("Device {mac_address}")),
            device_type: Some("phone".to_string()),
            network_user_id: owner.map(|u| u.id),
            zone_id: zone.map(|z| z.id),
            status: None,
        },
    )
    .await
    .expect("device should be created")
}
