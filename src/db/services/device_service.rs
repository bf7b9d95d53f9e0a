use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    Order, QueryFilter, QueryOrder, QuerySelect, Set, sea_query::NullOrdering,
};
use std::collections::{HashMap, HashSet};
use tracing::info;
use uuid::Uuid;

use super::require_text;
use super::zone_service::zone_names_by_id;
use crate::db::entities::{device, network_user};
use crate::db::enums::DeviceStatus;
use crate::db::models::{DeviceOwner, DeviceWithOwner};
use crate::stats::search::matches_search;
use crate::web::error::AppError;
use crate::web::models::network_models::{CreateDeviceRequest, UpdateDeviceRequest};

async fn owners_by_id(
    db: &DatabaseConnection,
    user_ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, DeviceOwner>, AppError> {
    let ids: HashSet<Uuid> = user_ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = network_user::Entity::find()
        .filter(network_user::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(users
        .into_iter()
        .map(|u| {
            (
                u.id,
                DeviceOwner {
                    username: u.username,
                    full_name: u.full_name,
                },
            )
        })
        .collect())
}

/// Attaches owner and zone name to each device, preserving order.
pub async fn with_owners(
    db: &DatabaseConnection,
    devices: Vec<device::Model>,
) -> Result<Vec<DeviceWithOwner>, AppError> {
    let owners = owners_by_id(db, devices.iter().filter_map(|d| d.network_user_id)).await?;
    let zones = zone_names_by_id(db, devices.iter().filter_map(|d| d.zone_id)).await?;

    Ok(devices
        .into_iter()
        .map(|d| DeviceWithOwner {
            network_user: d.network_user_id.and_then(|id| owners.get(&id).cloned()),
            zone: d.zone_id.and_then(|id| zones.get(&id).cloned()),
            device: d,
        })
        .collect())
}

/// Most recently seen first, never-seen devices last.
pub async fn list_devices(
    db: &DatabaseConnection,
    search: Option<&str>,
    limit: Option<u64>,
) -> Result<Vec<DeviceWithOwner>, AppError> {
    let devices = device::Entity::find()
        .order_by_with_nulls(device::Column::LastSeen, Order::Desc, NullOrdering::Last)
        .order_by_desc(device::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?;

    let devices = devices
        .into_iter()
        .filter(|d| {
            matches_search(
                search,
                &[
                    Some(&d.mac_address),
                    d.device_name.as_deref(),
                    d.ip_address.as_deref(),
                ],
            )
        })
        .collect();

    with_owners(db, devices).await
}

pub async fn get_device(db: &DatabaseConnection, device_id: Uuid) -> Result<device::Model, AppError> {
    device::Entity::find_by_id(device_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Device not found".to_string()))
}

pub async fn create_device<C: ConnectionTrait>(
    db: &C,
    payload: CreateDeviceRequest,
) -> Result<device::Model, AppError> {
    let status = payload.status.unwrap_or(DeviceStatus::Offline);
    let new_device = device::ActiveModel {
        id: Set(Uuid::new_v4()),
        mac_address: Set(require_text(&payload.mac_address, "mac_address")?),
        ip_address: Set(payload.ip_address),
        device_name: Set(payload.device_name),
        device_type: Set(payload.device_type),
        network_user_id: Set(payload.network_user_id),
        zone_id: Set(payload.zone_id),
        status: Set(Some(status)),
        bandwidth_used: Set(Some(0)),
        last_seen: Set(None),
        created_at: Set(Utc::now()),
    };

    let model = new_device.insert(db).await?;
    info!(device_id = %model.id, mac = %model.mac_address, %status, "Device registered.");
    Ok(model)
}

pub async fn update_device(
    db: &DatabaseConnection,
    device_id: Uuid,
    payload: UpdateDeviceRequest,
) -> Result<device::Model, AppError> {
    let existing = get_device(db, device_id).await?;
    let mut active_device = existing.clone().into_active_model();

    if let Some(mac_address) = payload.mac_address {
        active_device.mac_address = Set(require_text(&mac_address, "mac_address")?);
    }
    if let Some(ip_address) = payload.ip_address {
        active_device.ip_address = Set(ip_address);
    }
    if let Some(device_name) = payload.device_name {
        active_device.device_name = Set(device_name);
    }
    if let Some(device_type) = payload.device_type {
        active_device.device_type = Set(device_type);
    }
    if let Some(network_user_id) = payload.network_user_id {
        active_device.network_user_id = Set(network_user_id);
    }
    if let Some(zone_id) = payload.zone_id {
        active_device.zone_id = Set(zone_id);
    }
    if let Some(status) = payload.status {
        active_device.status = Set(Some(status));
    }

    if !active_device.is_changed() {
        return Ok(existing);
    }
    Ok(active_device.update(db).await?)
}

pub async fn delete_device(db: &DatabaseConnection, device_id: Uuid) -> Result<(), AppError> {
    let existing = get_device(db, device_id).await?;
    existing.delete(db).await?;
    info!(device_id = %device_id, "Device deleted.");
    Ok(())
}
