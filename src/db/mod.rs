use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

pub mod entities;
pub mod enums;
pub mod migrations;
pub mod models;
pub mod services;

use migrations::Migrator;

/// Opens the connection pool and brings the schema up to date.
pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(max_connections).sqlx_logging(false);

    let db = Database::connect(opt).await.map_err(|e| {
        error!(error = %e, "Failed to create database connection.");
        e
    })?;

    Migrator::up(&db, None).await.map_err(|e| {
        error!(error = %e, "Failed to apply database migrations.");
        e
    })?;
    info!("Database connected and migrations applied.");

    Ok(db)
}
