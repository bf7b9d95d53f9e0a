use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use super::alert_service::{count_unresolved_alerts, list_alerts};
use super::device_service::list_devices;
use super::usage_service::usage_overview;
use crate::db::entities::{device, network_user, wifi_session, zone};
use crate::db::enums::DeviceStatus;
use crate::db::models::{AlertWithDevice, DeviceWithOwner};
use crate::web::error::AppError;
use crate::web::models::network_models::AlertFilter;

const RECENT_ITEMS: u64 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_devices: u64,
    pub online_devices: u64,
    pub total_zones: u64,
    pub unresolved_alerts: u64,
    pub active_sessions: u64,
    pub total_time_minutes: i64,
    pub total_bytes_downloaded: i64,
    pub recent_devices: Vec<DeviceWithOwner>,
    pub recent_alerts: Vec<AlertWithDevice>,
}

pub async fn dashboard_stats(db: &DatabaseConnection) -> Result<DashboardStats, AppError> {
    let total_users = network_user::Entity::find().count(db).await?;
    let total_devices = device::Entity::find().count(db).await?;
    let online_devices = device::Entity::find()
        .filter(device::Column::Status.eq(DeviceStatus::Online))
        .count(db)
        .await?;
    let total_zones = zone::Entity::find().count(db).await?;
    let unresolved_alerts = count_unresolved_alerts(db).await?;
    let active_sessions = wifi_session::Entity::find()
        .filter(wifi_session::Column::IsActive.eq(true))
        .count(db)
        .await?;
    let usage = usage_overview(db).await?;

    Ok(DashboardStats {
        total_users,
        total_devices,
        online_devices,
        total_zones,
        unresolved_alerts,
        active_sessions,
        total_time_minutes: usage.total_time_minutes,
        total_bytes_downloaded: usage.total_bytes_downloaded,
        recent_devices: list_devices(db, None, Some(RECENT_ITEMS)).await?,
        recent_alerts: list_alerts(db, AlertFilter::Active, None, Some(RECENT_ITEMS)).await?,
    })
}
