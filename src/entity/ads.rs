use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{AdType, ItemCondition};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub ad_type: AdType,
    pub condition: Option<ItemCondition>,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub contact_phone: String,
    pub contact_whatsapp: Option<String>,
    pub contact_email: Option<String>,
    pub features: Json,
    pub is_active: bool,
    pub is_featured: bool,
    pub views_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
    #[sea_orm(has_many = "super::ad_media::Entity")]
    AdMedia,
    #[sea_orm(has_one = "super::property_details::Entity")]
    PropertyDetails,
    #[sea_orm(has_one = "super::car_details::Entity")]
    CarDetails,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::ad_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdMedia.def()
    }
}

impl Related<super::property_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyDetails.def()
    }
}

impl Related<super::car_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarDetails.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
