//! Per-user usage aggregation over network users and their WiFi sessions.
//!
//! Everything here is a pure recomputation over fully materialized rows; callers pass
//! `now` so ongoing sessions can be credited with the time elapsed so far.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::entities::{network_user, wifi_session};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserUsageStats {
    pub network_user_id: Uuid,
    pub full_name: String,
    pub username: String,
    pub department: Option<String>,
    pub total_sessions: usize,
    pub total_time_minutes: i64,
    pub total_bytes_downloaded: i64,
    pub total_bytes_uploaded: i64,
    pub active_sessions: usize,
    pub last_connected: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageOverview {
    pub users_online: usize,
    pub total_time_minutes: i64,
    pub total_bytes_downloaded: i64,
    pub total_bytes_uploaded: i64,
}

/// Whole minutes between `from` and `to`, never negative.
pub fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_minutes().max(0)
}

/// Minutes a single session contributes to its user's connected time.
///
/// A recorded non-zero duration wins; an open session without one is credited with the
/// time elapsed since it connected; anything else counts as zero.
pub fn session_minutes(session: &wifi_session::Model, now: DateTime<Utc>) -> i64 {
    match session.duration_minutes {
        Some(minutes) if minutes != 0 => minutes,
        _ if session.is_open() => elapsed_minutes(session.connected_at, now),
        _ => 0,
    }
}

/// Sum that pins at `i64::MAX` instead of overflowing.
fn saturating_total(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

pub fn compute_usage_stats(
    users: &[network_user::Model],
    sessions: &[wifi_session::Model],
    now: DateTime<Utc>,
) -> Vec<UserUsageStats> {
    let mut sessions_by_user: HashMap<Uuid, Vec<&wifi_session::Model>> = HashMap::new();
    for session in sessions {
        sessions_by_user
            .entry(session.network_user_id)
            .or_default()
            .push(session);
    }

    users
        .iter()
        .map(|user| {
            let user_sessions = sessions_by_user
                .get(&user.id)
                .map(Vec::as_slice)
                .unwrap_or_default();

            UserUsageStats {
                network_user_id: user.id,
                full_name: user.full_name.clone(),
                username: user.username.clone(),
                department: user.department.clone(),
                total_sessions: user_sessions.len(),
                total_time_minutes: saturating_total(
                    user_sessions.iter().map(|s| session_minutes(s, now)),
                ),
                total_bytes_downloaded: saturating_total(
                    user_sessions.iter().map(|s| s.bytes_downloaded.unwrap_or(0)),
                ),
                total_bytes_uploaded: saturating_total(
                    user_sessions.iter().map(|s| s.bytes_uploaded.unwrap_or(0)),
                ),
                active_sessions: user_sessions.iter().filter(|s| s.is_open()).count(),
                last_connected: user_sessions.iter().map(|s| s.connected_at).max(),
            }
        })
        .collect()
}

pub fn summarize_usage(stats: &[UserUsageStats]) -> UsageOverview {
    stats.iter().fold(UsageOverview::default(), |mut acc, s| {
        if s.active_sessions > 0 {
            acc.users_online += 1;
        }
        acc.total_time_minutes = acc.total_time_minutes.saturating_add(s.total_time_minutes);
        acc.total_bytes_downloaded = acc
            .total_bytes_downloaded
            .saturating_add(s.total_bytes_downloaded);
        acc.total_bytes_uploaded = acc.total_bytes_uploaded.saturating_add(s.total_bytes_uploaded);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn user(username: &str) -> network_user::Model {
        network_user::Model {
            id: Uuid::new_v4(),
            username: username.to_string(),
            full_name: format!("{username} Full"),
            email: None,
            department: Some("Engineering".to_string()),
            user_type: Some("student".to_string()),
            status: Some("active".to_string()),
            default_zone_id: None,
            total_bandwidth_used: Some(0),
            password_hash: None,
            last_seen: None,
            created_at: now(),
        }
    }

    fn session(
        user_id: Uuid,
        connected_minutes_ago: i64,
        duration: Option<i64>,
        active: Option<bool>,
        down: Option<i64>,
        up: Option<i64>,
    ) -> wifi_session::Model {
        let connected_at = now() - Duration::minutes(connected_minutes_ago);
        wifi_session::Model {
            id: Uuid::new_v4(),
            network_user_id: user_id,
            device_id: None,
            zone_id: None,
            connected_at,
            disconnected_at: None,
            duration_minutes: duration,
            bytes_downloaded: down,
            bytes_uploaded: up,
            ip_address: None,
            is_active: active,
            created_at: connected_at,
        }
    }

    #[test]
    fn test_user_without_sessions() {
        let users = vec![user("idle")];
        let stats = compute_usage_stats(&users, &[], now());

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_sessions, 0);
        assert_eq!(stats[0].total_time_minutes, 0);
        assert_eq!(stats[0].active_sessions, 0);
        assert_eq!(stats[0].last_connected, None);
    }

    #[test]
    fn test_aggregates_closed_and_open_sessions() {
        let alice = user("alice");
        let sessions = vec![
            session(alice.id, 300, Some(45), Some(false), Some(1_000), Some(200)),
            session(alice.id, 30, None, Some(true), None, Some(50)),
            session(alice.id, 600, None, Some(false), Some(10), None),
        ];
        let stats = compute_usage_stats(&[alice.clone()], &sessions, now());
        let s = &stats[0];

        assert_eq!(s.network_user_id, alice.id);
        assert_eq!(s.total_sessions, 3);
        assert_eq!(s.active_sessions, 1);
        // 45 recorded + 30 elapsed on the open session + 0 for the closed one without a duration
        assert_eq!(s.total_time_minutes, 75);
        assert_eq!(s.total_bytes_downloaded, 1_010);
        assert_eq!(s.total_bytes_uploaded, 250);
        assert_eq!(s.last_connected, Some(now() - Duration::minutes(30)));
    }

    #[test]
    fn test_zero_duration_on_open_session_uses_elapsed_time() {
        let bob = user("bob");
        let sessions = vec![session(bob.id, 12, Some(0), Some(true), None, None)];
        let stats = compute_usage_stats(&[bob], &sessions, now());
        assert_eq!(stats[0].total_time_minutes, 12);
    }

    #[test]
    fn test_future_connection_is_not_negative() {
        let carol = user("carol");
        let sessions = vec![session(carol.id, -10, None, Some(true), None, None)];
        let stats = compute_usage_stats(&[carol], &sessions, now());
        assert_eq!(stats[0].total_time_minutes, 0);
    }

    #[test]
    fn test_sessions_are_attributed_to_their_owner_only() {
        let alice = user("alice");
        let bob = user("bob");
        let stranger = Uuid::new_v4();
        let sessions = vec![
            session(alice.id, 5, Some(5), Some(false), Some(1), Some(1)),
            session(bob.id, 5, Some(7), Some(false), Some(2), Some(2)),
            session(stranger, 5, Some(9), Some(true), Some(4), Some(4)),
        ];
        let stats = compute_usage_stats(&[alice, bob], &sessions, now());

        assert_eq!(stats[0].username, "alice");
        assert_eq!(stats[0].total_time_minutes, 5);
        assert_eq!(stats[1].username, "bob");
        assert_eq!(stats[1].total_time_minutes, 7);
        assert_eq!(stats.iter().map(|s| s.total_sessions).sum::<usize>(), 2);
    }

    #[test]
    fn test_summarize_usage() {
        let alice = user("alice");
        let bob = user("bob");
        let sessions = vec![
            session(alice.id, 20, None, Some(true), Some(100), Some(10)),
            session(bob.id, 90, Some(60), Some(false), Some(300), Some(30)),
        ];
        let overview = summarize_usage(&compute_usage_stats(&[alice, bob], &sessions, now()));

        assert_eq!(overview.users_online, 1);
        assert_eq!(overview.total_time_minutes, 80);
        assert_eq!(overview.total_bytes_downloaded, 400);
        assert_eq!(overview.total_bytes_uploaded, 40);
    }

    #[test]
    fn test_byte_totals_saturate_instead_of_wrapping() {
        let alice = user("alice");
        let bob = user("bob");
        let sessions = vec![
            session(alice.id, 5, Some(5), Some(false), Some(i64::MAX), Some(1)),
            session(alice.id, 5, Some(5), Some(false), Some(i64::MAX), Some(1)),
            session(bob.id, 5, Some(5), Some(false), Some(10), Some(1)),
        ];
        let stats = compute_usage_stats(&[alice, bob], &sessions, now());
        assert_eq!(stats[0].total_bytes_downloaded, i64::MAX);

        let overview = summarize_usage(&stats);
        assert_eq!(overview.total_bytes_downloaded, i64::MAX);
        assert_eq!(overview.total_bytes_uploaded, 3);
    }
}
