//! SeaORM entities mapping the campus network tables.

pub mod bandwidth_log;
pub mod device;
pub mod intrusion_alert;
pub mod network_user;
pub mod user;
pub mod user_role;
pub mod wifi_session;
pub mod zone;
