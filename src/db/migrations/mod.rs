use sea_orm_migration::prelude::*;

mod m20250101_000001_create_network_tables;
mod m20250101_000002_create_auth_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_network_tables::Migration),
            Box::new(m20250101_000002_create_auth_tables::Migration),
        ]
    }
}
