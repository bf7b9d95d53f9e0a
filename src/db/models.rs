//! Joined row views returned by the list endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::db::entities::{bandwidth_log, device, intrusion_alert, wifi_session, zone};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ZoneName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
    pub full_name: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionDevice {
    pub mac_address: String,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionWithDetails {
    #[serde(flatten)]
    pub session: wifi_session::Model,
    pub network_user: Option<SessionUser>,
    pub device: Option<SessionDevice>,
    pub zone: Option<ZoneName>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeviceOwner {
    pub username: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeviceWithOwner {
    #[serde(flatten)]
    pub device: device::Model,
    pub network_user: Option<DeviceOwner>,
    pub zone: Option<ZoneName>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlertDevice {
    pub mac_address: String,
    pub device_name: Option<String>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertWithDevice {
    #[serde(flatten)]
    pub alert: intrusion_alert::Model,
    pub device: Option<AlertDevice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BandwidthLogWithZone {
    #[serde(flatten)]
    pub log: bandwidth_log::Model,
    pub zone: Option<ZoneName>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneWithUtilization {
    #[serde(flatten)]
    pub zone: zone::Model,
    pub utilization_percent: f64,
}

impl ZoneWithUtilization {
    pub fn from_model(zone: zone::Model) -> Self {
        let utilization_percent = match zone.max_capacity {
            Some(max) if max > 0 => {
                f64::from(zone.current_devices.unwrap_or(0)) / f64::from(max) * 100.0
            }
            _ => 0.0,
        };
        Self {
            zone,
            utilization_percent,
        }
    }
}

/// Picker entry for the public portal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PortalZone {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn zone(current: Option<i32>, max: Option<i32>) -> zone::Model {
        zone::Model {
            id: Uuid::new_v4(),
            name: "Library".to_string(),
            location: "Block A".to_string(),
            ap_count: Some(2),
            max_capacity: max,
            current_devices: current,
            status: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_zone_utilization() {
        assert_eq!(ZoneWithUtilization::from_model(zone(Some(25), Some(100))).utilization_percent, 25.0);
        assert_eq!(ZoneWithUtilization::from_model(zone(None, Some(50))).utilization_percent, 0.0);
        assert_eq!(ZoneWithUtilization::from_model(zone(Some(10), Some(0))).utilization_percent, 0.0);
        assert_eq!(ZoneWithUtilization::from_model(zone(Some(10), None)).utilization_percent, 0.0);
    }

    #[test]
    fn test_session_view_flattens_row() {
        let now = Utc::now();
        let view = SessionWithDetails {
            session: wifi_session::Model {
                id: Uuid::new_v4(),
                network_user_id: Uuid::new_v4(),
                device_id: None,
                zone_id: None,
                connected_at: now,
                disconnected_at: None,
                duration_minutes: None,
                bytes_downloaded: Some(0),
                bytes_uploaded: Some(0),
                ip_address: None,
                is_active: Some(true),
                created_at: now,
            },
            network_user: None,
            device: None,
            zone: Some(ZoneName { name: "Hall".to_string() }),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["is_active"], true);
        assert_eq!(json["zone"]["name"], "Hall");
        assert!(json["network_user"].is_null());
    }
}
