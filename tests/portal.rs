mod common;

use campusnet::db::enums::{DeviceStatus, NETWORK_USER_BLOCKED};
use campusnet::db::services;
use campusnet::services::portal_service;
use campusnet::web::error::AppError;
use campusnet::web::models::network_models::{CreateDeviceRequest, UpdateNetworkUserRequest};
use campusnet::web::models::portal_models::PortalConnectRequest;
use campusnet::web::models::session_models::ConnectRequest;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use common::{seed_network_user, seed_zone, setup_db};

fn connect_as(username: &str, zone_id: Option<Uuid>) -> PortalConnectRequest {
    PortalConnectRequest {
        username: username.to_string(),
        device_name: None,
        device_type: None,
        zone_id,
    }
}

#[tokio::test]
async fn test_portal_rejects_blank_and_unknown_usernames() {
    let db = setup_db().await;

    let err = portal_service::portal_connect(&db, connect_as("   ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(msg) if msg == "Please enter your username"));

    let err = portal_service::portal_connect(&db, connect_as("ghost", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_portal_refuses_blocked_user() {
    let db = setup_db().await;
    let user = seed_network_user(&db, "jdoe", "Jane Doe").await;
    services::update_network_user(
        &db,
        user.id,
        UpdateNetworkUserRequest {
            username: None,
            full_name: None,
            email: None,
            department: None,
            user_type: None,
            status: Some(NETWORK_USER_BLOCKED.to_string()),
            default_zone_id: None,
        },
    )
    .await
    .unwrap();

    let err = portal_service::portal_connect(&db, connect_as("jdoe", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert!(services::list_devices(&db, None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_portal_rejects_unknown_zone() {
    let db = setup_db().await;
    seed_network_user(&db, "jdoe", "Jane Doe").await;

    let err = portal_service::portal_connect(&db, connect_as("jdoe", Some(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_portal_connect_registers_device_and_opens_session() {
    let db = setup_db().await;
    let zone = seed_zone(&db, "Library").await;
    let user = seed_network_user(&db, "jdoe", "Jane Doe").await;

    let view = portal_service::portal_connect(&db, connect_as("  jdoe ", Some(zone.id)))
        .await
        .unwrap();

    assert!(view.is_active);
    assert_eq!(view.network_user_id, user.id);
    assert_eq!(view.full_name, "Jane Doe");
    assert_eq!(view.zone_name.as_deref(), Some("Library"));
    assert_eq!(view.device_name.as_deref(), Some("Jane Doe's laptop"));
    assert_eq!(view.device_type.as_deref(), Some("laptop"));
    assert_eq!(view.bytes_downloaded, 0);
    assert_eq!(view.data_used, "0 B");
    assert_eq!(view.duration_minutes, 0);

    let devices = services::list_devices(&db, None, None).await.unwrap();
    assert_eq!(devices.len(), 1);
    let registered = &devices[0].device;
    assert_eq!(registered.status, Some(DeviceStatus::Online));
    assert_eq!(registered.network_user_id, Some(user.id));
    assert_eq!(registered.mac_address.split(':').count(), 6);
    assert!(registered
        .ip_address
        .as_deref()
        .is_some_and(|ip| ip.starts_with("192.168.")));

    let fetched = portal_service::portal_session(&db, view.session_id)
        .await
        .unwrap();
    assert_eq!(fetched.session_id, view.session_id);
    assert!(fetched.is_active);
}

#[tokio::test]
async fn test_portal_keeps_custom_device_details() {
    let db = setup_db().await;
    seed_network_user(&db, "jdoe", "Jane Doe").await;

    let view = portal_service::portal_connect(
        &db,
        PortalConnectRequest {
            username: "jdoe".to_string(),
            device_name: Some("Work Tablet".to_string()),
            device_type: Some("tablet".to_string()),
            zone_id: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(view.device_name.as_deref(), Some("Work Tablet"));
    assert_eq!(view.device_type.as_deref(), Some("tablet"));
    assert_eq!(view.zone_name, None);
}

#[tokio::test]
async fn test_portal_disconnect_ends_session() {
    let db = setup_db().await;
    seed_network_user(&db, "jdoe", "Jane Doe").await;
    let view = portal_service::portal_connect(&db, connect_as("jdoe", None))
        .await
        .unwrap();

    let closed = portal_service::portal_disconnect(&db, view.session_id)
        .await
        .unwrap();
    assert!(!closed.is_active);
    assert!(closed.disconnected_at.is_some());
    assert!((0..500_000_000).contains(&closed.bytes_downloaded));
    assert!((0..100_000_000).contains(&closed.bytes_uploaded));

    let devices = services::list_devices(&db, None, None).await.unwrap();
    assert_eq!(devices[0].device.status, Some(DeviceStatus::Offline));

    let err = portal_service::portal_disconnect(&db, view.session_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_failed_session_open_rolls_back_registered_device() {
    let db = setup_db().await;
    let txn = db.begin().await.unwrap();

    let device = services::create_device(
        &txn,
        CreateDeviceRequest {
            mac_address: "AA:BB:CC:00:00:01".to_string(),
            ip_address: Some("192.168.1.10".to_string()),
            device_name: Some("Jane Doe's laptop".to_string()),
            device_type: Some("laptop".to_string()),
            network_user_id: None,
            zone_id: None,
            status: Some(DeviceStatus::Online),
        },
    )
    .await
    .unwrap();

    let err = services::open_session(
        &txn,
        ConnectRequest {
            network_user_id: Uuid::new_v4(),
            device_id: Some(device.id),
            zone_id: None,
            ip_address: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    txn.rollback().await.unwrap();

    assert!(services::list_devices(&db, None, None).await.unwrap().is_empty());
    let stats = services::dashboard_stats(&db).await.unwrap();
    assert_eq!(stats.online_devices, 0);
}
