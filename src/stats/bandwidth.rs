use serde::Serialize;

use crate::db::models::BandwidthLogWithZone;

pub const CHART_POINTS: usize = 24;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub time: String,
    pub download: f64,
    pub upload: f64,
    pub devices: i32,
    pub zone: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthSummary {
    pub avg_download: f64,
    pub avg_upload: f64,
    pub peak_download: f64,
    pub peak_devices: i32,
    pub chart: Vec<ChartPoint>,
}

/// Summarizes logs given newest first, as returned by the log listing.
pub fn summarize_bandwidth(logs: &[BandwidthLogWithZone]) -> BandwidthSummary {
    if logs.is_empty() {
        return BandwidthSummary::default();
    }

    let count = logs.len() as f64;
    let download = |l: &BandwidthLogWithZone| l.log.download_mbps.unwrap_or(0.0);
    let upload = |l: &BandwidthLogWithZone| l.log.upload_mbps.unwrap_or(0.0);
    let devices = |l: &BandwidthLogWithZone| l.log.active_devices.unwrap_or(0);

    let chart = logs
        .iter()
        .take(CHART_POINTS)
        .rev()
        .map(|l| ChartPoint {
            time: l.log.recorded_at.format("%H:%M").to_string(),
            download: download(l),
            upload: upload(l),
            devices: devices(l),
            zone: l
                .zone
                .as_ref()
                .map(|z| z.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    BandwidthSummary {
        avg_download: logs.iter().map(download).sum::<f64>() / count,
        avg_upload: logs.iter().map(upload).sum::<f64>() / count,
        peak_download: logs.iter().map(download).fold(0.0, f64::max),
        peak_devices: logs.iter().map(devices).max().unwrap_or(0).max(0),
        chart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::bandwidth_log;
    use crate::db::models::ZoneName;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn log(
        minutes_after_noon: i64,
        down: Option<f64>,
        up: Option<f64>,
        devices: Option<i32>,
        zone: Option<&str>,
    ) -> BandwidthLogWithZone {
        let noon = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        BandwidthLogWithZone {
            log: bandwidth_log::Model {
                id: Uuid::new_v4(),
                zone_id: None,
                download_mbps: down,
                upload_mbps: up,
                active_devices: devices,
                recorded_at: noon + Duration::minutes(minutes_after_noon),
            },
            zone: zone.map(|name| ZoneName {
                name: name.to_string(),
            }),
        }
    }

    #[test]
    fn test_empty_logs() {
        let summary = summarize_bandwidth(&[]);
        assert_eq!(summary, BandwidthSummary::default());
        assert!(summary.chart.is_empty());
    }

    #[test]
    fn test_averages_and_peaks() {
        let logs = vec![
            log(20, Some(120.0), Some(40.0), Some(12), Some("Library")),
            log(10, None, Some(20.0), None, None),
            log(0, Some(60.0), None, Some(30), Some("Hall")),
        ];
        let summary = summarize_bandwidth(&logs);

        assert_eq!(summary.avg_download, 60.0);
        assert_eq!(summary.avg_upload, 20.0);
        assert_eq!(summary.peak_download, 120.0);
        assert_eq!(summary.peak_devices, 30);
    }

    #[test]
    fn test_chart_is_chronological() {
        let logs = vec![
            log(20, Some(3.0), Some(3.0), Some(3), Some("Library")),
            log(10, Some(2.0), Some(2.0), Some(2), None),
            log(0, Some(1.0), Some(1.0), Some(1), Some("Hall")),
        ];
        let chart = summarize_bandwidth(&logs).chart;

        let times: Vec<&str> = chart.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(times, vec!["12:00", "12:10", "12:20"]);
        assert_eq!(chart[0].zone, "Hall");
        assert_eq!(chart[1].zone, "Unknown");
        assert_eq!(chart[2].download, 3.0);
    }

    #[test]
    fn test_chart_keeps_newest_points_only() {
        let logs: Vec<_> = (0..30)
            .rev()
            .map(|i| log(i, Some(i as f64), Some(0.0), Some(1), None))
            .collect();
        let summary = summarize_bandwidth(&logs);

        assert_eq!(summary.chart.len(), CHART_POINTS);
        assert_eq!(summary.chart.first().map(|p| p.download), Some(6.0));
        assert_eq!(summary.chart.last().map(|p| p.download), Some(29.0));
        assert_eq!(summary.peak_download, 29.0);
    }
}
