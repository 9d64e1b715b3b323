use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{FurnishedType, HeatingType, PropertyType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "property_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub ad_id: Uuid,
    pub property_type: PropertyType,
    pub area: Option<i32>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub floor: Option<i32>,
    pub total_floors: Option<i32>,
    pub build_year: Option<i32>,
    pub has_garage: bool,
    pub has_garden: bool,
    pub has_elevator: bool,
    pub has_security: bool,
    pub has_pool: bool,
    pub has_balcony: bool,
    pub furnished: Option<FurnishedType>,
    pub heating_type: Option<HeatingType>,
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
