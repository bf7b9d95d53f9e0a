use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::db::entities::{network_user, wifi_session};
use crate::stats::search::matches_search;
use crate::stats::usage::{UsageOverview, UserUsageStats, compute_usage_stats, summarize_usage};
use crate::web::error::AppError;

async fn all_usage_stats(db: &DatabaseConnection) -> Result<Vec<UserUsageStats>, AppError> {
    let users = network_user::Entity::find()
        .order_by_asc(network_user::Column::FullName)
        .all(db)
        .await?;
    let sessions = wifi_session::Entity::find().all(db).await?;

    Ok(compute_usage_stats(&users, &sessions, Utc::now()))
}

/// Per-user usage; search covers full name, username and department.
pub async fn user_usage_stats(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<UserUsageStats>, AppError> {
    Ok(all_usage_stats(db)
        .await?
        .into_iter()
        .filter(|s| {
            matches_search(
                search,
                &[
                    Some(&s.full_name),
                    Some(&s.username),
                    s.department.as_deref(),
                ],
            )
        })
        .collect())
}

pub async fn usage_overview(db: &DatabaseConnection) -> Result<UsageOverview, AppError> {
    Ok(summarize_usage(&all_usage_stats(db).await?))
}
