//! Request bodies for the admin CRUD endpoints. Field names follow the row JSON.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use crate::db::enums::{DeviceStatus, ZoneStatus};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateZoneRequest {
    pub name: String,
    pub location: String,
    pub ap_count: Option<i32>,
    pub max_capacity: Option<i32>,
    pub status: Option<ZoneStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateZoneRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub ap_count: Option<i32>,
    pub max_capacity: Option<i32>,
    pub status: Option<ZoneStatus>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNetworkUserRequest {
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub user_type: Option<String>,
    pub status: Option<String>,
    pub default_zone_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateNetworkUserRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub department: Option<Option<String>>,
    pub user_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub default_zone_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeviceRequest {
    pub mac_address: String,
    pub ip_address: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub network_user_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub status: Option<DeviceStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeviceRequest {
    pub mac_address: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub ip_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub device_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub device_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub network_user_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub zone_id: Option<Option<Uuid>>,
    pub status: Option<DeviceStatus>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateBandwidthLogRequest {
    pub zone_id: Option<Uuid>,
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
    pub active_devices: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BandwidthQuery {
    pub zone_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAlertRequest {
    pub device_id: Option<Uuid>,
    pub alert_type: String,
    pub severity: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertFilter {
    #[default]
    All,
    Active,
    Resolved,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertQuery {
    #[serde(default)]
    pub filter: AlertFilter,
    pub search: Option<String>,
}
