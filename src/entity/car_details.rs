use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{BodyType, DrivetrainType, FuelType, TransmissionType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "car_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub ad_id: Uuid,
    pub brand: String,
    #[sea_orm(column_name = "model")]
    pub model_name: String,
    pub year: i32,
    pub mileage: Option<i32>,
    pub fuel_type: FuelType,
    pub transmission: TransmissionType,
    pub engine_size: Option<f64>,
    pub horse_power: Option<i32>,
    pub color: Option<String>,
    pub body_type: BodyType,
    pub drivetrain: Option<DrivetrainType>,
    pub has_air_conditioning: bool,
    pub has_leather_seats: bool,
    pub has_sunroof: bool,
    pub has_navigation_system: bool,
    pub has_bluetooth_connectivity: bool,
    pub has_parking_sensors: bool,
    pub has_backup_camera: bool,
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
