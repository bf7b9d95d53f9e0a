pub mod admin_routes;
pub mod alert_routes;
pub mod bandwidth_routes;
pub mod dashboard_routes;
pub mod device_routes;
pub mod network_user_routes;
pub mod portal_routes;
pub mod session_routes;
pub mod usage_routes;
pub mod zone_routes;
