use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::enums::DeviceStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mac_address: String,
    pub ip_address: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub network_user_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub status: Option<DeviceStatus>,
    pub bandwidth_used: Option<i64>,
    pub last_seen: Option<ChronoDateTimeUtc>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::network_user::Entity",
        from = "Column::NetworkUserId",
        to = "super::network_user::Column::Id",
        on_delete = "SetNull"
    )]
    NetworkUser,
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Id",
        on_delete = "SetNull"
    )]
    Zone,
    #[sea_orm(has_many = "super::intrusion_alert::Entity")]
    IntrusionAlerts,
}

impl Related<super::network_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkUser.def()
    }
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::intrusion_alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IntrusionAlerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
