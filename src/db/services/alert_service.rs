use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::db::entities::{device, intrusion_alert};
use crate::db::enums::{ALERT_SEVERITIES, DEFAULT_ALERT_SEVERITY};
use crate::db::models::{AlertDevice, AlertWithDevice};
use crate::stats::search::matches_search;
use crate::web::error::AppError;
use crate::web::models::network_models::{AlertFilter, CreateAlertRequest};

#[derive(Debug, Serialize)]
pub struct AlertList {
    pub alerts: Vec<AlertWithDevice>,
    pub active_count: u64,
}

fn validate_severity(severity: Option<String>) -> Result<String, AppError> {
    let severity = severity.unwrap_or_else(|| DEFAULT_ALERT_SEVERITY.to_string());
    if ALERT_SEVERITIES.contains(&severity.as_str()) {
        Ok(severity)
    } else {
        Err(AppError::InvalidInput(format!(
            "Invalid severity '{severity}', expected one of: {}",
            ALERT_SEVERITIES.join(", ")
        )))
    }
}

pub async fn count_unresolved_alerts(db: &DatabaseConnection) -> Result<u64, AppError> {
    Ok(intrusion_alert::Entity::find()
        .filter(intrusion_alert::Column::Resolved.eq(false))
        .count(db)
        .await?)
}

/// Newest first, joined with the flagged device.
pub async fn list_alerts(
    db: &DatabaseConnection,
    filter: AlertFilter,
    search: Option<&str>,
    limit: Option<u64>,
) -> Result<Vec<AlertWithDevice>, AppError> {
    let mut query = intrusion_alert::Entity::find();
    query = match filter {
        AlertFilter::All => query,
        AlertFilter::Active => query.filter(intrusion_alert::Column::Resolved.eq(false)),
        AlertFilter::Resolved => query.filter(intrusion_alert::Column::Resolved.eq(true)),
    };

    let rows = query
        .order_by_desc(intrusion_alert::Column::CreatedAt)
        .limit(limit)
        .find_also_related(device::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(alert, device)| AlertWithDevice {
            alert,
            device: device.map(|d| AlertDevice {
                mac_address: d.mac_address,
                device_name: d.device_name,
                ip_address: d.ip_address,
            }),
        })
        .filter(|row| {
            matches_search(
                search,
                &[
                    Some(&row.alert.alert_type),
                    row.alert.description.as_deref(),
                    row.device.as_ref().map(|d| d.mac_address.as_str()),
                ],
            )
        })
        .collect())
}

pub async fn list_alerts_with_count(
    db: &DatabaseConnection,
    filter: AlertFilter,
    search: Option<&str>,
) -> Result<AlertList, AppError> {
    Ok(AlertList {
        alerts: list_alerts(db, filter, search, None).await?,
        active_count: count_unresolved_alerts(db).await?,
    })
}

pub async fn create_alert(
    db: &DatabaseConnection,
    payload: CreateAlertRequest,
) -> Result<intrusion_alert::Model, AppError> {
    let alert_type = payload.alert_type.trim().to_string();
    if alert_type.is_empty() {
        return Err(AppError::InvalidInput("alert_type is required".to_string()));
    }
    let severity = validate_severity(payload.severity)?;

    let new_alert = intrusion_alert::ActiveModel {
        id: Set(Uuid::new_v4()),
        device_id: Set(payload.device_id),
        alert_type: Set(alert_type),
        severity: Set(Some(severity)),
        description: Set(payload.description),
        resolved: Set(Some(false)),
        created_at: Set(Utc::now()),
    };

    let model = new_alert.insert(db).await?;
    info!(alert_id = %model.id, alert_type = %model.alert_type, severity = ?model.severity, "Intrusion alert raised.");
    Ok(model)
}

pub async fn resolve_alert(
    db: &DatabaseConnection,
    alert_id: Uuid,
) -> Result<intrusion_alert::Model, AppError> {
    let alert = intrusion_alert::Entity::find_by_id(alert_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Alert not found".to_string()))?;

    let mut active_alert = alert.into_active_model();
    active_alert.resolved = Set(Some(true));
    let model = active_alert.update(db).await?;
    info!(alert_id = %alert_id, "Intrusion alert resolved.");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_severity() {
        assert_eq!(validate_severity(None).unwrap(), "medium");
        assert_eq!(validate_severity(Some("critical".to_string())).unwrap(), "critical");
        assert!(matches!(
            validate_severity(Some("urgent".to_string())),
            Err(AppError::InvalidInput(_))
        ));
    }
}
