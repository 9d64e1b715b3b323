use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::MediaType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ad_media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ad_id: Uuid,
    pub file_path: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub media_type: MediaType,
    /// At most one row per ad; backed by a partial unique index.
    pub is_primary: bool,
    pub sort_order: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ads::Entity",
        from = "Column::AdId",
        to = "super::ads::Column::Id",
        on_delete = "Cascade"
    )]
    Ads,
}

impl Related<super::ads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
