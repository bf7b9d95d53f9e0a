use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::db::entities::{bandwidth_log, zone};
use crate::db::models::{BandwidthLogWithZone, ZoneName};
use crate::stats::bandwidth::{BandwidthSummary, summarize_bandwidth};
use crate::web::error::AppError;
use crate::web::models::network_models::CreateBandwidthLogRequest;

pub const BANDWIDTH_LOG_LIMIT: u64 = 100;

/// Latest logs first, optionally restricted to one zone.
pub async fn list_bandwidth_logs(
    db: &DatabaseConnection,
    zone_id: Option<Uuid>,
) -> Result<Vec<BandwidthLogWithZone>, AppError> {
    let mut query = bandwidth_log::Entity::find();
    if let Some(zone_id) = zone_id {
        query = query.filter(bandwidth_log::Column::ZoneId.eq(zone_id));
    }

    let rows = query
        .order_by_desc(bandwidth_log::Column::RecordedAt)
        .limit(BANDWIDTH_LOG_LIMIT)
        .find_also_related(zone::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(log, zone)| BandwidthLogWithZone {
            log,
            zone: zone.map(|z| ZoneName { name: z.name }),
        })
        .collect())
}

pub async fn add_bandwidth_log(
    db: &DatabaseConnection,
    payload: CreateBandwidthLogRequest,
) -> Result<bandwidth_log::Model, AppError> {
    let new_log = bandwidth_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        zone_id: Set(payload.zone_id),
        download_mbps: Set(payload.download_mbps),
        upload_mbps: Set(payload.upload_mbps),
        active_devices: Set(payload.active_devices),
        recorded_at: Set(Utc::now()),
    };
    Ok(new_log.insert(db).await?)
}

pub async fn bandwidth_summary(
    db: &DatabaseConnection,
    zone_id: Option<Uuid>,
) -> Result<BandwidthSummary, AppError> {
    let logs = list_bandwidth_logs(db, zone_id).await?;
    Ok(summarize_bandwidth(&logs))
}

/// One random reading for the given zone.
pub fn sample_reading<R: Rng>(rng: &mut R, zone_id: Uuid) -> CreateBandwidthLogRequest {
    CreateBandwidthLogRequest {
        zone_id: Some(zone_id),
        download_mbps: Some(rng.random_range(50.0..150.0)),
        upload_mbps: Some(rng.random_range(20.0..70.0)),
        active_devices: Some(rng.random_range(5..35)),
    }
}

/// Inserts one random log per zone.
pub async fn generate_sample_data(
    db: &DatabaseConnection,
) -> Result<Vec<bandwidth_log::Model>, AppError> {
    let zones = zone::Entity::find().all(db).await?;
    if zones.is_empty() {
        return Err(AppError::InvalidInput(
            "Please add some zones first".to_string(),
        ));
    }

    let readings: Vec<CreateBandwidthLogRequest> = {
        let mut rng = rand::rng();
        zones.iter().map(|z| sample_reading(&mut rng, z.id)).collect()
    };

    let txn = db.begin().await?;
    let now = Utc::now();
    let mut inserted = Vec::with_capacity(readings.len());
    for reading in readings {
        let log = bandwidth_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            zone_id: Set(reading.zone_id),
            download_mbps: Set(reading.download_mbps),
            upload_mbps: Set(reading.upload_mbps),
            active_devices: Set(reading.active_devices),
            recorded_at: Set(now),
        };
        inserted.push(log.insert(&txn).await?);
    }
    txn.commit().await?;

    info!(count = inserted.len(), "Generated sample bandwidth logs.");
    Ok(inserted)
}
