use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::ZoneStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "zones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub ap_count: Option<i32>,
    pub max_capacity: Option<i32>,
    pub current_devices: Option<i32>,
    pub status: Option<ZoneStatus>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device::Entity")]
    Devices,
    #[sea_orm(has_many = "super::bandwidth_log::Entity")]
    BandwidthLogs,
    #[sea_orm(has_many = "super::wifi_session::Entity")]
    WifiSessions,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Devices.def()
    }
}

impl Related<super::bandwidth_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BandwidthLogs.def()
    }
}

impl Related<super::wifi_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WifiSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
