use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One connect/disconnect interval of a network user, optionally tied to a device and zone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wifi_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub network_user_id: Uuid,
    pub device_id: Option<Uuid>,
    pub zone_id: Option<Uuid>,
    pub connected_at: ChronoDateTimeUtc,
    pub disconnected_at: Option<ChronoDateTimeUtc>,
    pub duration_minutes: Option<i64>,
    pub bytes_downloaded: Option<i64>,
    pub bytes_uploaded: Option<i64>,
    pub ip_address: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: ChronoDateTimeUtc,
}

impl Model {
    pub fn is_open(&self) -> bool {
        self.is_active.unwrap_or(false)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::network_user::Entity",
        from = "Column::NetworkUserId",
        to = "super::network_user::Column::Id",
        on_delete = "Cascade"
    )]
    NetworkUser,
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id",
        on_delete = "SetNull"
    )]
    Device,
    #[sea_orm(
        belongs_to = "super::zone::Entity",
        from = "Column::ZoneId",
        to = "super::zone::Column::Id",
        on_delete = "SetNull"
    )]
    Zone,
}

impl Related<super::network_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkUser.def()
    }
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl Related<super::zone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
