use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Zones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Zones::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Zones::Name).string().not_null())
                    .col(ColumnDef::new(Zones::Location).string().not_null())
                    .col(ColumnDef::new(Zones::ApCount).integer().default(1))
                    .col(ColumnDef::new(Zones::MaxCapacity).integer().default(100))
                    .col(ColumnDef::new(Zones::CurrentDevices).integer().default(0))
                    .col(ColumnDef::new(Zones::Status).string().default("active"))
                    .col(
                        ColumnDef::new(Zones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NetworkUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NetworkUsers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(NetworkUsers::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NetworkUsers::FullName).string().not_null())
                    .col(ColumnDef::new(NetworkUsers::Email).string())
                    .col(ColumnDef::new(NetworkUsers::Department).string())
                    .col(ColumnDef::new(NetworkUsers::UserType).string().default("student"))
                    .col(ColumnDef::new(NetworkUsers::Status).string().default("active"))
                    .col(ColumnDef::new(NetworkUsers::DefaultZoneId).uuid())
                    .col(
                        ColumnDef::new(NetworkUsers::TotalBandwidthUsed)
                            .big_integer()
                            .default(0),
                    )
                    .col(ColumnDef::new(NetworkUsers::PasswordHash).string())
                    .col(ColumnDef::new(NetworkUsers::LastSeen).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(NetworkUsers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-network_users-default_zone_id")
                            .from(NetworkUsers::Table, NetworkUsers::DefaultZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Devices::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Devices::MacAddress).string().not_null())
                    .col(ColumnDef::new(Devices::IpAddress).string())
                    .col(ColumnDef::new(Devices::DeviceName).string())
                    .col(ColumnDef::new(Devices::DeviceType).string())
                    .col(ColumnDef::new(Devices::NetworkUserId).uuid())
                    .col(ColumnDef::new(Devices::ZoneId).uuid())
                    .col(ColumnDef::new(Devices::Status).string().default("offline"))
                    .col(ColumnDef::new(Devices::BandwidthUsed).big_integer().default(0))
                    .col(ColumnDef::new(Devices::LastSeen).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Devices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-devices-network_user_id")
                            .from(Devices::Table, Devices::NetworkUserId)
                            .to(NetworkUsers::Table, NetworkUsers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-devices-zone_id")
                            .from(Devices::Table, Devices::ZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BandwidthLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BandwidthLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(BandwidthLogs::ZoneId).uuid())
                    .col(ColumnDef::new(BandwidthLogs::DownloadMbps).double())
                    .col(ColumnDef::new(BandwidthLogs::UploadMbps).double())
                    .col(ColumnDef::new(BandwidthLogs::ActiveDevices).integer())
                    .col(
                        ColumnDef::new(BandwidthLogs::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-bandwidth_logs-zone_id")
                            .from(BandwidthLogs::Table, BandwidthLogs::ZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IntrusionAlerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(IntrusionAlerts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(IntrusionAlerts::DeviceId).uuid())
                    .col(ColumnDef::new(IntrusionAlerts::AlertType).string().not_null())
                    .col(ColumnDef::new(IntrusionAlerts::Severity).string().default("medium"))
                    .col(ColumnDef::new(IntrusionAlerts::Description).text())
                    .col(ColumnDef::new(IntrusionAlerts::Resolved).boolean().default(false))
                    .col(
                        ColumnDef::new(IntrusionAlerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-intrusion_alerts-device_id")
                            .from(IntrusionAlerts::Table, IntrusionAlerts::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WifiSessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(WifiSessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(WifiSessions::NetworkUserId).uuid().not_null())
                    .col(ColumnDef::new(WifiSessions::DeviceId).uuid())
                    .col(ColumnDef::new(WifiSessions::ZoneId).uuid())
                    .col(
                        ColumnDef::new(WifiSessions::ConnectedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WifiSessions::DisconnectedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(WifiSessions::DurationMinutes).big_integer())
                    .col(ColumnDef::new(WifiSessions::BytesDownloaded).big_integer().default(0))
                    .col(ColumnDef::new(WifiSessions::BytesUploaded).big_integer().default(0))
                    .col(ColumnDef::new(WifiSessions::IpAddress).string())
                    .col(ColumnDef::new(WifiSessions::IsActive).boolean().default(true))
                    .col(
                        ColumnDef::new(WifiSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wifi_sessions-network_user_id")
                            .from(WifiSessions::Table, WifiSessions::NetworkUserId)
                            .to(NetworkUsers::Table, NetworkUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wifi_sessions-device_id")
                            .from(WifiSessions::Table, WifiSessions::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wifi_sessions-zone_id")
                            .from(WifiSessions::Table, WifiSessions::ZoneId)
                            .to(Zones::Table, Zones::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-wifi_sessions-is_active")
                    .table(WifiSessions::Table)
                    .col(WifiSessions::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WifiSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IntrusionAlerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BandwidthLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NetworkUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Zones {
    Table,
    Id,
    Name,
    Location,
    ApCount,
    MaxCapacity,
    CurrentDevices,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum NetworkUsers {
    Table,
    Id,
    Username,
    FullName,
    Email,
    Department,
    UserType,
    Status,
    DefaultZoneId,
    TotalBandwidthUsed,
    PasswordHash,
    LastSeen,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Devices {
    Table,
    Id,
    MacAddress,
    IpAddress,
    DeviceName,
    DeviceType,
    NetworkUserId,
    ZoneId,
    Status,
    BandwidthUsed,
    LastSeen,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BandwidthLogs {
    Table,
    Id,
    ZoneId,
    DownloadMbps,
    UploadMbps,
    ActiveDevices,
    RecordedAt,
}

#[derive(DeriveIden)]
enum IntrusionAlerts {
    Table,
    Id,
    DeviceId,
    AlertType,
    Severity,
    Description,
    Resolved,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WifiSessions {
    Table,
    Id,
    NetworkUserId,
    DeviceId,
    ZoneId,
    ConnectedAt,
    DisconnectedAt,
    DurationMinutes,
    BytesDownloaded,
    BytesUploaded,
    IpAddress,
    IsActive,
    CreatedAt,
}
