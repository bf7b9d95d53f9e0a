mod common;

use campusnet::db::services;
use campusnet::web::models::network_models::{UpdateDeviceRequest, UpdateNetworkUserRequest};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};

use common::{seed_device, seed_network_user, seed_zone, setup_db};

fn no_device_changes() -> UpdateDeviceRequest {
    UpdateDeviceRequest {
        mac_address: None,
        ip_address: None,
        device_name: None,
        device_type: None,
        network_user_id: None,
        zone_id: None,
        status: None,
    }
}

fn no_user_changes() -> UpdateNetworkUserRequest {
    UpdateNetworkUserRequest {
        username: None,
        full_name: None,
        email: None,
        department: None,
        user_type: None,
        status: None,
        default_zone_id: None,
    }
}

#[tokio::test]
async fn test_devices_ordered_by_last_seen_with_owner_and_zone() {
    let db = setup_db().await;
    let zone = seed_zone(&db, "Library").await;
    let jane = seed_network_user(&db, "jdoe", "Jane Doe").await;
    let older = seed_device(&db, "AA:BB:CC:00:00:01", Some(&jane), Some(&zone)).await;
    let newer = seed_device(&db, "AA:BB:CC:00:00:02", None, None).await;
    // Created last, so it would lead a plain created_at ordering.
    let never_seen = seed_device(&db, "AA:BB:CC:00:00:03", None, None).await;

    let now = Utc::now();
    for (dev, minutes_ago) in [(&older, 30), (&newer, 5)] {
        let mut active = dev.clone().into_active_model();
        active.last_seen = Set(Some(now - Duration::minutes(minutes_ago)));
        active.update(&db).await.unwrap();
    }

    let devices = services::list_devices(&db, None, None).await.unwrap();
    let ids: Vec<_> = devices.iter().map(|row| row.device.id).collect();
    assert_eq!(ids, vec![newer.id, older.id, never_seen.id]);

    let owned = &devices[1];
    let owner = owned.network_user.as_ref().unwrap();
    assert_eq!(owner.username, "jdoe");
    assert_eq!(owner.full_name, "Jane Doe");
    assert_eq!(owned.zone.as_ref().unwrap().name, "Library");
    assert!(devices[0].network_user.is_none());
    assert!(devices[0].zone.is_none());

    let limited = services::list_devices(&db, None, Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_device_search_covers_mac_name_and_ip() {
    let db = setup_db().await;
    seed_device(&db, "AA:BB:CC:00:00:01", None, None).await;
    let printer = seed_device(&db, "AA:BB:CC:00:00:02", None, None).await;
    services::update_device(
        &db,
        printer.id,
        UpdateDeviceRequest {
            device_name: Some(Some("Lab Printer".to_string())),
            ip_address: Some(Some("10.1.1.5".to_string())),
            ..no_device_changes()
        },
    )
    .await
    .unwrap();

    for term in ["cc:00:00:02", "PRINTER", "10.1.1"] {
        let found = services::list_devices(&db, Some(term), None).await.unwrap();
        assert_eq!(found.len(), 1, "search {term:?}");
        assert_eq!(found[0].device.id, printer.id);
    }
    assert_eq!(
        services::list_devices(&db, Some("aa:bb"), None).await.unwrap().len(),
        2
    );
    assert!(services::list_devices(&db, Some("nothing"), None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_device_clears_nullable_fields() {
    let db = setup_db().await;
    let zone = seed_zone(&db, "Library").await;
    let jane = seed_network_user(&db, "jdoe", "Jane Doe").await;
    let dev = seed_device(&db, "AA:BB:CC:00:00:01", Some(&jane), Some(&zone)).await;

    let updated = services::update_device(
        &db,
        dev.id,
        UpdateDeviceRequest {
            ip_address: Some(None),
            zone_id: Some(None),
            network_user_id: Some(None),
            ..no_device_changes()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.ip_address, None);
    assert_eq!(updated.zone_id, None);
    assert_eq!(updated.network_user_id, None);
    // Omitted fields are left alone.
    assert_eq!(updated.device_name, dev.device_name);
    assert_eq!(updated.device_type.as_deref(), Some("phone"));
}

#[tokio::test]
async fn test_network_users_newest_first_and_searchable() {
    let db = setup_db().await;
    let jane = seed_network_user(&db, "jdoe", "Jane Doe").await;
    let sam = seed_network_user(&db, "ssmith", "Sam Smith").await;
    let lee = seed_network_user(&db, "lkim", "Lee Kim").await;

    let now = Utc::now();
    for (user, hours_ago) in [(&jane, 1), (&sam, 3), (&lee, 2)] {
        let mut active = user.clone().into_active_model();
        active.created_at = Set(now - Duration::hours(hours_ago));
        active.update(&db).await.unwrap();
    }

    let users = services::list_network_users(&db, None).await.unwrap();
    let ids: Vec<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![jane.id, lee.id, sam.id]);

    services::update_network_user(
        &db,
        lee.id,
        UpdateNetworkUserRequest {
            email: Some(Some("lee@research.org".to_string())),
            ..no_user_changes()
        },
    )
    .await
    .unwrap();

    for (term, expected) in [("SSMITH", sam.id), ("jane", jane.id), ("research.org", lee.id)] {
        let found = services::list_network_users(&db, Some(term)).await.unwrap();
        assert_eq!(found.len(), 1, "search {term:?}");
        assert_eq!(found[0].id, expected);
    }
    assert_eq!(
        services::list_network_users(&db, Some("campus.edu"))
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_update_network_user_clears_nullable_fields() {
    let db = setup_db().await;
    let zone = seed_zone(&db, "Library").await;
    let jane = seed_network_user(&db, "jdoe", "Jane Doe").await;
    services::update_network_user(
        &db,
        jane.id,
        UpdateNetworkUserRequest {
            default_zone_id: Some(Some(zone.id)),
            ..no_user_changes()
        },
    )
    .await
    .unwrap();

    let cleared = services::update_network_user(
        &db,
        jane.id,
        UpdateNetworkUserRequest {
            email: Some(None),
            department: Some(None),
            default_zone_id: Some(None),
            ..no_user_changes()
        },
    )
    .await
    .unwrap();

    assert_eq!(cleared.email, None);
    assert_eq!(cleared.department, None);
    assert_eq!(cleared.default_zone_id, None);
    assert_eq!(cleared.full_name, "Jane Doe");
}
