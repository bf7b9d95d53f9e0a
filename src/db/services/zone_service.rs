use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, Set,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

use super::require_text;
use crate::db::entities::{wifi_session, zone};
use crate::db::enums::ZoneStatus;
use crate::db::models::{PortalZone, ZoneName, ZoneWithUtilization};
use crate::stats::search::matches_search;
use crate::web::error::AppError;
use crate::web::models::network_models::{CreateZoneRequest, UpdateZoneRequest};

const DEFAULT_AP_COUNT: i32 = 1;
const DEFAULT_MAX_CAPACITY: i32 = 100;

/// All zones ordered by name, with their utilization.
pub async fn list_zones(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<ZoneWithUtilization>, AppError> {
    let zones = zone::Entity::find()
        .order_by_asc(zone::Column::Name)
        .all(db)
        .await?;

    Ok(zones
        .into_iter()
        .filter(|z| matches_search(search, &[Some(&z.name), Some(&z.location)]))
        .map(ZoneWithUtilization::from_model)
        .collect())
}

pub async fn get_zone(db: &DatabaseConnection, zone_id: Uuid) -> Result<zone::Model, AppError> {
    zone::Entity::find_by_id(zone_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Zone not found".to_string()))
}

pub async fn create_zone(
    db: &DatabaseConnection,
    payload: CreateZoneRequest,
) -> Result<zone::Model, AppError> {
    let new_zone = zone::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(require_text(&payload.name, "name")?),
        location: Set(require_text(&payload.location, "location")?),
        ap_count: Set(Some(payload.ap_count.unwrap_or(DEFAULT_AP_COUNT))),
        max_capacity: Set(Some(payload.max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY))),
        current_devices: Set(Some(0)),
        status: Set(Some(payload.status.unwrap_or(ZoneStatus::Active))),
        created_at: Set(Utc::now()),
    };

    let model = new_zone.insert(db).await?;
    info!(zone_id = %model.id, name = %model.name, "Zone created.");
    Ok(model)
}

pub async fn update_zone(
    db: &DatabaseConnection,
    zone_id: Uuid,
    payload: UpdateZoneRequest,
) -> Result<zone::Model, AppError> {
    let existing = get_zone(db, zone_id).await?;
    let mut active_zone = existing.clone().into_active_model();

    if let Some(name) = payload.name {
        active_zone.name = Set(require_text(&name, "name")?);
    }
    if let Some(location) = payload.location {
        active_zone.location = Set(require_text(&location, "location")?);
    }
    if let Some(ap_count) = payload.ap_count {
        active_zone.ap_count = Set(Some(ap_count));
    }
    if let Some(max_capacity) = payload.max_capacity {
        active_zone.max_capacity = Set(Some(max_capacity));
    }
    if let Some(status) = payload.status {
        active_zone.status = Set(Some(status));
    }

    if !active_zone.is_changed() {
        return Ok(existing);
    }
    Ok(active_zone.update(db).await?)
}

pub async fn delete_zone(db: &DatabaseConnection, zone_id: Uuid) -> Result<(), AppError> {
    let existing = get_zone(db, zone_id).await?;
    existing.delete(db).await?;
    info!(zone_id = %zone_id, "Zone deleted.");
    Ok(())
}

/// Zone picker entries for the public portal.
pub async fn list_portal_zones(db: &DatabaseConnection) -> Result<Vec<PortalZone>, AppError> {
    let zones = zone::Entity::find()
        .order_by_asc(zone::Column::Name)
        .all(db)
        .await?;

    Ok(zones
        .into_iter()
        .map(|z| PortalZone {
            id: z.id,
            name: z.name,
            location: z.location,
        })
        .collect())
}

/// Sets every zone's `current_devices` to the number of open sessions in it.
/// Returns how many zones changed.
pub async fn sync_zone_device_counts(db: &DatabaseConnection) -> Result<usize, AppError> {
    let open_sessions = wifi_session::Entity::find()
        .filter(wifi_session::Column::IsActive.eq(true))
        .all(db)
        .await?;

    let mut counts: HashMap<Uuid, i32> = HashMap::new();
    for zone_id in open_sessions.iter().filter_map(|s| s.zone_id) {
        *counts.entry(zone_id).or_insert(0) += 1;
    }

    let mut changed = 0;
    for z in zone::Entity::find().all(db).await? {
        let count = counts.get(&z.id).copied().unwrap_or(0);
        if z.current_devices == Some(count) {
            continue;
        }
        debug!(zone_id = %z.id, previous = ?z.current_devices, current = count, "Updating zone occupancy.");
        let mut active_zone = z.into_active_model();
        active_zone.current_devices = Set(Some(count));
        active_zone.update(db).await?;
        changed += 1;
    }

    Ok(changed)
}

/// Zone names keyed by id, for attaching to joined rows.
pub async fn zone_names_by_id(
    db: &DatabaseConnection,
    zone_ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, ZoneName>, AppError> {
    let ids: HashSet<Uuid> = zone_ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let zones = zone::Entity::find()
        .filter(zone::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(zones
        .into_iter()
        .map(|z| (z.id, ZoneName { name: z.name }))
        .collect())
}
