//! Data access for the campus network tables.
//!
//! Each sub-module owns one domain entity. Everything is re-exported here so callers can
//! use `crate::db::services::*`.

use crate::web::error::AppError;

pub mod alert_service;
pub mod bandwidth_service;
pub mod dashboard_service;
pub mod device_service;
pub mod network_user_service;
pub mod session_service;
pub mod usage_service;
pub mod user_service;
pub mod zone_service;

pub use alert_service::*;
pub use bandwidth_service::*;
pub use dashboard_service::*;
pub use device_service::*;
pub use network_user_service::*;
pub use session_service::*;
pub use usage_service::*;
pub use user_service::*;
pub use zone_service::*;

/// Trimmed value of a required text field.
pub(crate) fn require_text(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
