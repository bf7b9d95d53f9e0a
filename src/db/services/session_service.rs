//! WiFi session queries and the connect/disconnect lifecycle.
//!
//! A session is created open (`is_active = true`) by [`connect_session`] and closed once by
//! [`disconnect_session`]; a closed session is never reopened. Both transitions update the
//! session's device and user in the same transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::Expr,
};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use uuid::Uuid;

use super::zone_service::zone_names_by_id;
use crate::db::entities::{device, network_user, wifi_session};
use crate::db::enums::DeviceStatus;
use crate::db::models::{SessionDevice, SessionUser, SessionWithDetails};
use crate::stats::search::matches_search;
use crate::stats::usage::elapsed_minutes;
use crate::web::error::AppError;
use crate::web::models::session_models::ConnectRequest;

pub const SESSION_LIST_LIMIT: u64 = 200;
pub const USER_SESSION_LIMIT: u64 = 50;

/// Attaches user, device and zone details to each session, preserving order.
pub async fn attach_session_details(
    db: &DatabaseConnection,
    sessions: Vec<wifi_session::Model>,
) -> Result<Vec<SessionWithDetails>, AppError> {
    let user_ids: HashSet<Uuid> = sessions.iter().map(|s| s.network_user_id).collect();
    let device_ids: HashSet<Uuid> = sessions.iter().filter_map(|s| s.device_id).collect();

    let users: HashMap<Uuid, SessionUser> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        network_user::Entity::find()
            .filter(network_user::Column::Id.is_in(user_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    SessionUser {
                        username: u.username,
                        full_name: u.full_name,
                        department: u.department,
                    },
                )
            })
            .collect()
    };

    let devices: HashMap<Uuid, SessionDevice> = if device_ids.is_empty() {
        HashMap::new()
    } else {
        device::Entity::find()
            .filter(device::Column::Id.is_in(device_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|d| {
                (
                    d.id,
                    SessionDevice {
                        mac_address: d.mac_address,
                        device_name: d.device_name,
                        device_type: d.device_type,
                    },
                )
            })
            .collect()
    };

    let zones = zone_names_by_id(db, sessions.iter().filter_map(|s| s.zone_id)).await?;

    Ok(sessions
        .into_iter()
        .map(|session| SessionWithDetails {
            network_user: users.get(&session.network_user_id).cloned(),
            device: session.device_id.and_then(|id| devices.get(&id).cloned()),
            zone: session.zone_id.and_then(|id| zones.get(&id).cloned()),
            session,
        })
        .collect())
}

fn session_matches(row: &SessionWithDetails, search: Option<&str>) -> bool {
    matches_search(
        search,
        &[
            row.network_user.as_ref().map(|u| u.full_name.as_str()),
            row.network_user.as_ref().map(|u| u.username.as_str()),
            row.zone.as_ref().map(|z| z.name.as_str()),
            row.device.as_ref().map(|d| d.mac_address.as_str()),
        ],
    )
}

/// The latest sessions, newest first.
pub async fn list_sessions(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<SessionWithDetails>, AppError> {
    let sessions = wifi_session::Entity::find()
        .order_by_desc(wifi_session::Column::ConnectedAt)
        .limit(SESSION_LIST_LIMIT)
        .all(db)
        .await?;

    let rows = attach_session_details(db, sessions).await?;
    Ok(rows.into_iter().filter(|r| session_matches(r, search)).collect())
}

pub async fn list_active_sessions(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<SessionWithDetails>, AppError> {
    let sessions = wifi_session::Entity::find()
        .filter(wifi_session::Column::IsActive.eq(true))
        .order_by_desc(wifi_session::Column::ConnectedAt)
        .all(db)
        .await?;

    let rows = attach_session_details(db, sessions).await?;
    Ok(rows.into_iter().filter(|r| session_matches(r, search)).collect())
}

/// A network user's latest sessions.
pub async fn list_user_sessions(
    db: &DatabaseConnection,
    network_user_id: Uuid,
) -> Result<Vec<SessionWithDetails>, AppError> {
    if network_user::Entity::find_by_id(network_user_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Network user not found".to_string()));
    }

    let sessions = wifi_session::Entity::find()
        .filter(wifi_session::Column::NetworkUserId.eq(network_user_id))
        .order_by_desc(wifi_session::Column::ConnectedAt)
        .limit(USER_SESSION_LIMIT)
        .all(db)
        .await?;

    attach_session_details(db, sessions).await
}

pub async fn get_session(
    db: &DatabaseConnection,
    session_id: Uuid,
) -> Result<wifi_session::Model, AppError> {
    wifi_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
}

/// Opens a session on an existing connection or transaction, marking its device online and
/// its user as seen. Callers own the transaction.
pub async fn open_session<C: ConnectionTrait>(
    conn: &C,
    payload: ConnectRequest,
) -> Result<wifi_session::Model, AppError> {
    let now = Utc::now();

    let user = network_user::Entity::find_by_id(payload.network_user_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Network user not found".to_string()))?;

    if let Some(device_id) = payload.device_id {
        let device = device::Entity::find_by_id(device_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Device not found".to_string()))?;
        let mut active_device = device.into_active_model();
        active_device.status = Set(Some(DeviceStatus::Online));
        active_device.last_seen = Set(Some(now));
        active_device.update(conn).await?;
    }

    let session = wifi_session::ActiveModel {
        id: Set(Uuid::new_v4()),
        network_user_id: Set(user.id),
        device_id: Set(payload.device_id),
        zone_id: Set(payload.zone_id),
        connected_at: Set(now),
        disconnected_at: Set(None),
        duration_minutes: Set(None),
        bytes_downloaded: Set(Some(0)),
        bytes_uploaded: Set(Some(0)),
        ip_address: Set(payload.ip_address),
        is_active: Set(Some(true)),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    let mut active_user = user.into_active_model();
    active_user.last_seen = Set(Some(now));
    active_user.update(conn).await?;

    Ok(session)
}

/// Opens a session in its own transaction.
pub async fn connect_session(
    db: &DatabaseConnection,
    payload: ConnectRequest,
) -> Result<wifi_session::Model, AppError> {
    let txn = db.begin().await?;
    let session = open_session(&txn, payload).await?;
    txn.commit().await?;

    info!(
        session_id = %session.id,
        network_user_id = %session.network_user_id,
        device_id = ?session.device_id,
        zone_id = ?session.zone_id,
        "Session connected."
    );
    Ok(session)
}

fn require_non_negative(value: i64, field: &str) -> Result<i64, AppError> {
    if value < 0 {
        return Err(AppError::InvalidInput(format!("{field} must not be negative")));
    }
    Ok(value)
}

fn add_bytes(stored: Option<i64>, delta: i64, field: &str) -> Result<i64, AppError> {
    stored
        .unwrap_or(0)
        .checked_add(delta)
        .ok_or_else(|| AppError::InvalidInput(format!("{field} total is out of range")))
}

/// Closes an open session, adding the final byte deltas and recording its duration.
///
/// The close is a conditional update on `is_active`, so of two concurrent disconnects only
/// one can succeed; the other gets a Conflict.
pub async fn disconnect_session(
    db: &DatabaseConnection,
    session_id: Uuid,
    bytes_downloaded: i64,
    bytes_uploaded: i64,
) -> Result<wifi_session::Model, AppError> {
    let bytes_downloaded = require_non_negative(bytes_downloaded, "bytes_downloaded")?;
    let bytes_uploaded = require_non_negative(bytes_uploaded, "bytes_uploaded")?;

    let txn = db.begin().await?;
    let now = Utc::now();

    let session = wifi_session::Entity::find_by_id(session_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    if !session.is_open() {
        warn!(session_id = %session_id, "Disconnect requested for a closed session.");
        return Err(AppError::Conflict("Session is already disconnected".to_string()));
    }

    let duration = elapsed_minutes(session.connected_at, now);
    let total_down = add_bytes(session.bytes_downloaded, bytes_downloaded, "bytes_downloaded")?;
    let total_up = add_bytes(session.bytes_uploaded, bytes_uploaded, "bytes_uploaded")?;

    let closed_rows = wifi_session::Entity::update_many()
        .col_expr(wifi_session::Column::DisconnectedAt, Expr::value(now))
        .col_expr(wifi_session::Column::IsActive, Expr::value(false))
        .col_expr(wifi_session::Column::DurationMinutes, Expr::value(duration))
        .col_expr(wifi_session::Column::BytesDownloaded, Expr::value(total_down))
        .col_expr(wifi_session::Column::BytesUploaded, Expr::value(total_up))
        .filter(wifi_session::Column::Id.eq(session_id))
        .filter(wifi_session::Column::IsActive.eq(true))
        .exec(&txn)
        .await?
        .rows_affected;

    if closed_rows == 0 {
        warn!(session_id = %session_id, "Session was closed by a concurrent disconnect.");
        return Err(AppError::Conflict("Session is already disconnected".to_string()));
    }

    if let Some(device_id) = session.device_id {
        if let Some(device) = device::Entity::find_by_id(device_id).one(&txn).await? {
            let mut active_device = device.into_active_model();
            active_device.status = Set(Some(DeviceStatus::Offline));
            active_device.update(&txn).await?;
        }
    }

    let closed = wifi_session::Entity::find_by_id(session_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    txn.commit().await?;

    info!(
        session_id = %closed.id,
        duration_minutes = duration,
        bytes_downloaded = total_down,
        bytes_uploaded = total_up,
        "Session disconnected."
    );
    Ok(closed)
}

/// Overwrites the byte counters of a session.
pub async fn update_session_bandwidth(
    db: &DatabaseConnection,
    session_id: Uuid,
    bytes_downloaded: i64,
    bytes_uploaded: i64,
) -> Result<wifi_session::Model, AppError> {
    let bytes_downloaded = require_non_negative(bytes_downloaded, "bytes_downloaded")?;
    let bytes_uploaded = require_non_negative(bytes_uploaded, "bytes_uploaded")?;

    let session = get_session(db, session_id).await?;
    let mut active_session = session.into_active_model();
    active_session.bytes_downloaded = Set(Some(bytes_downloaded));
    active_session.bytes_uploaded = Set(Some(bytes_uploaded));
    Ok(active_session.update(db).await?)
}
