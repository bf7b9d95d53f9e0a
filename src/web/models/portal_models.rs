use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct PortalConnectRequest {
    pub username: String,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub zone_id: Option<Uuid>,
}

/// What the portal shows a connected user about their own session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalSession {
    pub session_id: Uuid,
    pub network_user_id: Uuid,
    pub username: String,
    pub full_name: String,
    pub zone_name: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub connected_at: DateTime<Utc>,
    pub disconnected_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub duration_minutes: i64,
    pub duration: String,
    pub bytes_downloaded: i64,
    pub bytes_uploaded: i64,
    /// Downloaded plus uploaded, human readable.
    pub data_used: String,
}
