use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub network_user_id: Uuid,
    pub device_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DisconnectRequest {
    #[serde(default)]
    pub bytes_downloaded: i64,
    #[serde(default)]
    pub bytes_uploaded: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSessionBandwidthRequest {
    pub bytes_downloaded: i64,
    pub bytes_uploaded: i64,
}
