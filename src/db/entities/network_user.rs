use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "network_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub user_type: Option<String>,
    pub status: Option<String>,
    pub default_zone_id: Option<Uuid>,
    pub total_bandwidth_used: Option<i64>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub last_seen: Option<ChronoDateTimeUtc>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::DefaultZoneId",
        to = "super::zone::Column::Id",
        on_delete = "SetNull"
    )]
    DefaultZone,
    #[sea_orm(has_many = "super::device::Entity")]
    Devices,
    #[sea_orm(has_many = "super::wifi_session::Entity")]
    WifiSessions,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Devices.def()
    }
}

impl Related<super::wifi_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WifiSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
