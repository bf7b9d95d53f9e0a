use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tracing::{debug, error, info};

use crate::db::services;

/// Periodically recomputes each zone's `current_devices` from open sessions.
pub fn spawn_zone_occupancy_task(db: DatabaseConnection, interval_seconds: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(interval_seconds.max(1)));
        info!(interval_seconds, "Zone occupancy sync task started.");

        loop {
            interval.tick().await;
            match services::sync_zone_device_counts(&db).await {
                Ok(0) => debug!("Zone occupancy already up to date."),
                Ok(changed) => info!(count = changed, "Zone occupancy updated."),
                Err(e) => error!(error = %e, "Error syncing zone occupancy."),
            }
        }
    })
}
