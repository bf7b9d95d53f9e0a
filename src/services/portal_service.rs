//! Self-service captive portal: a network user connects by username alone.
//!
//! Devices registered here get a made-up MAC and a private IP; there is no real network
//! assignment behind them.

use chrono::{DateTime, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::db::entities::wifi_session;
use crate::db::enums::{DeviceStatus, NETWORK_USER_BLOCKED};
use crate::db::services;
use crate::stats::format::{format_bytes, format_duration};
use crate::stats::usage::elapsed_minutes;
use crate::web::error::AppError;
use crate::web::models::network_models::CreateDeviceRequest;
use crate::web::models::portal_models::{PortalConnectRequest, PortalSession};
use crate::web::models::session_models::ConnectRequest;

pub const DEFAULT_DEVICE_TYPE: &str = "laptop";
const MAX_SIMULATED_DOWNLOAD: i64 = 500_000_000;
const MAX_SIMULATED_UPLOAD: i64 = 100_000_000;

/// Six uppercase hex octets separated by colons.
pub fn random_mac_address<R: Rng>(rng: &mut R) -> String {
    (0..6)
        .map(|_| format!("{:02X}", rng.random::<u8>()))
        .collect::<Vec<_>>()
        .join(":")
}

pub fn random_ip_address<R: Rng>(rng: &mut R) -> String {
    format!(
        "192.168.{}.{}",
        rng.random_range(0..255),
        rng.random_range(0..255)
    )
}

pub fn default_device_name(full_name: &str, device_type: &str) -> String {
    format!("{full_name}'s {device_type}")
}

async fn portal_view(
    db: &DatabaseConnection,
    session: wifi_session::Model,
    now: DateTime<Utc>,
) -> Result<PortalSession, AppError> {
    let network_user = services::get_network_user(db, session.network_user_id).await?;
    let zone_name = match session.zone_id {
        Some(zone_id) => services::get_zone(db, zone_id).await.ok().map(|z| z.name),
        None => None,
    };
    let device = match session.device_id {
        Some(device_id) => services::get_device(db, device_id).await.ok(),
        None => None,
    };

    let duration_minutes = match session.duration_minutes {
        Some(minutes) if !session.is_open() => minutes,
        _ => elapsed_minutes(session.connected_at, now),
    };

    let bytes_downloaded = session.bytes_downloaded.unwrap_or(0);
    let bytes_uploaded = session.bytes_uploaded.unwrap_or(0);

    Ok(PortalSession {
        session_id: session.id,
        network_user_id: network_user.id,
        username: network_user.username,
        full_name: network_user.full_name,
        zone_name,
        device_name: device.as_ref().and_then(|d| d.device_name.clone()),
        device_type: device.and_then(|d| d.device_type),
        connected_at: session.connected_at,
        disconnected_at: session.disconnected_at,
        is_active: session.is_open(),
        duration_minutes,
        duration: format_duration(duration_minutes as f64),
        bytes_downloaded,
        bytes_uploaded,
        data_used: format_bytes(bytes_downloaded.saturating_add(bytes_uploaded)),
    })
}

pub async fn portal_connect(
    db: &DatabaseConnection,
    req: PortalConnectRequest,
) -> Result<PortalSession, AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter your username".to_string(),
        ));
    }

    let network_user = services::find_network_user_by_username(db, username)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("User not found. Please contact IT support.".to_string())
        })?;

    if network_user.status.as_deref() == Some(NETWORK_USER_BLOCKED) {
        info!(username = %network_user.username, "Portal connect refused for blocked user.");
        return Err(AppError::Forbidden(
            "Your account has been blocked. Please contact IT support.".to_string(),
        ));
    }

    if let Some(zone_id) = req.zone_id {
        services::get_zone(db, zone_id).await?;
    }

    let device_type = req
        .device_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_DEVICE_TYPE)
        .to_string();
    let device_name = req
        .device_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_device_name(&network_user.full_name, &device_type));

    let (mac_address, ip_address) = {
        let mut rng = rand::rng();
        (random_mac_address(&mut rng), random_ip_address(&mut rng))
    };

    // Device and session commit together so a failed connect leaves no device behind.
    let txn = db.begin().await?;
    let device = services::create_device(
        &txn,
        CreateDeviceRequest {
            mac_address,
            ip_address: Some(ip_address.clone()),
            device_name: Some(device_name),
            device_type: Some(device_type),
            network_user_id: Some(network_user.id),
            zone_id: req.zone_id,
            status: Some(DeviceStatus::Online),
        },
    )
    .await?;

    let session = services::open_session(
        &txn,
        ConnectRequest {
            network_user_id: network_user.id,
            device_id: Some(device.id),
            zone_id: req.zone_id,
            ip_address: Some(ip_address),
        },
    )
    .await?;
    txn.commit().await?;
    info!(
        session_id = %session.id,
        device_id = %device.id,
        username = %network_user.username,
        "Portal session opened."
    );

    portal_view(db, session, Utc::now()).await
}

pub async fn portal_session(
    db: &DatabaseConnection,
    session_id: Uuid,
) -> Result<PortalSession, AppError> {
    let session = services::get_session(db, session_id).await?;
    portal_view(db, session, Utc::now()).await
}

/// Ends a portal session with simulated traffic figures.
pub async fn portal_disconnect(
    db: &DatabaseConnection,
    session_id: Uuid,
) -> Result<PortalSession, AppError> {
    let (downloaded, uploaded) = {
        let mut rng = rand::rng();
        (
            rng.random_range(0..MAX_SIMULATED_DOWNLOAD),
            rng.random_range(0..MAX_SIMULATED_UPLOAD),
        )
    };

    let closed = services::disconnect_session(db, session_id, downloaded, uploaded).await?;
    portal_view(db, closed, Utc::now()).await
}
