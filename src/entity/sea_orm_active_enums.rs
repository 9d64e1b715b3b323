//! Enumerations stored as text columns.
//!
//! Each variant maps to the upper snake case string kept in the database and
//! exchanged over JSON, so `ActiveEnum::try_from_value` doubles as the parser
//! for query-string and payload values.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdType {
    #[sea_orm(string_value = "SALE")]
    Sale,
    #[sea_orm(string_value = "RENT")]
    Rent,
    #[sea_orm(string_value = "WANTED")]
    Wanted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCondition {
    #[sea_orm(string_value = "NEW")]
    New,
    #[sea_orm(string_value = "LIKE_NEW")]
    LikeNew,
    #[sea_orm(string_value = "EXCELLENT")]
    Excellent,
    #[sea_orm(string_value = "GOOD")]
    Good,
    #[sea_orm(string_value = "USED")]
    Used,
    #[sea_orm(string_value = "ACCEPTABLE")]
    Acceptable,
    #[sea_orm(string_value = "NEEDS_REPAIR")]
    NeedsRepair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    #[sea_orm(string_value = "IMAGE")]
    Image,
    #[sea_orm(string_value = "VIDEO")]
    Video,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfileType {
    #[sea_orm(string_value = "PERSONAL")]
    Personal,
    #[sea_orm(string_value = "COMPANY")]
    Company,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    #[sea_orm(string_value = "APARTMENT")]
    Apartment,
    #[sea_orm(string_value = "HOUSE")]
    House,
    #[sea_orm(string_value = "VILLA")]
    Villa,
    #[sea_orm(string_value = "OFFICE")]
    Office,
    #[sea_orm(string_value = "SHOP")]
    Shop,
    #[sea_orm(string_value = "LAND")]
    Land,
    #[sea_orm(string_value = "STUDIO")]
    Studio,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FurnishedType {
    #[sea_orm(string_value = "FURNISHED")]
    Furnished,
    #[sea_orm(string_value = "SEMI_FURNISHED")]
    SemiFurnished,
    #[sea_orm(string_value = "UNFURNISHED")]
    Unfurnished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeatingType {
    #[sea_orm(string_value = "CENTRAL")]
    Central,
    #[sea_orm(string_value = "INDIVIDUAL")]
    Individual,
    #[sea_orm(string_value = "ELECTRIC")]
    Electric,
    #[sea_orm(string_value = "GAS")]
    Gas,
    #[sea_orm(string_value = "NONE")]
    #[serde(rename = "NONE")]
    Unheated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    #[sea_orm(string_value = "GASOLINE")]
    Gasoline,
    #[sea_orm(string_value = "DIESEL")]
    Diesel,
    #[sea_orm(string_value = "HYBRID")]
    Hybrid,
    #[sea_orm(string_value = "ELECTRIC")]
    Electric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransmissionType {
    #[sea_orm(string_value = "MANUAL")]
    Manual,
    #[sea_orm(string_value = "AUTOMATIC")]
    Automatic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyType {
    #[sea_orm(string_value = "SEDAN")]
    Sedan,
    #[sea_orm(string_value = "HATCHBACK")]
    Hatchback,
    #[sea_orm(string_value = "SUV")]
    Suv,
    #[sea_orm(string_value = "COUPE")]
    Coupe,
    #[sea_orm(string_value = "PICKUP")]
    Pickup,
    #[sea_orm(string_value = "VAN")]
    Van,
    #[sea_orm(string_value = "CONVERTIBLE")]
    Convertible,
    #[sea_orm(string_value = "WAGON")]
    Wagon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrivetrainType {
    #[sea_orm(string_value = "FWD")]
    Fwd,
    #[sea_orm(string_value = "RWD")]
    Rwd,
    #[sea_orm(string_value = "AWD")]
    Awd,
    #[sea_orm(string_value = "FOUR_WD")]
    FourWd,
}

/// Parses a loosely formatted value (`"sale"`, `"Like New"`, `"like-new"`)
/// into one of the enums above.
pub fn parse_enum<T: ActiveEnum<Value = String>>(raw: &str) -> Option<T> {
    let normalized = raw.trim().to_uppercase().replace(['-', ' '], "_");
    if normalized.is_empty() {
        return None;
    }
    T::try_from_value(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_and_separator_variants() {
        assert_eq!(parse_enum::<AdType>("sale"), Some(AdType::Sale));
        assert_eq!(parse_enum::<ItemCondition>("like-new"), Some(ItemCondition::LikeNew));
        assert_eq!(parse_enum::<ItemCondition>("Needs Repair"), Some(ItemCondition::NeedsRepair));
        assert_eq!(parse_enum::<DrivetrainType>("four_wd"), Some(DrivetrainType::FourWd));
    }

    #[test]
    fn rejects_unknown_and_blank_values() {
        assert_eq!(parse_enum::<AdType>("AUCTION"), None);
        assert_eq!(parse_enum::<AdType>("   "), None);
    }

    #[test]
    fn serde_and_database_share_the_same_spelling() {
        let json = serde_json::to_string(&FurnishedType::SemiFurnished).unwrap();
        assert_eq!(json, "\"SEMI_FURNISHED\"");
        assert_eq!(FurnishedType::SemiFurnished.to_value(), "SEMI_FURNISHED");
    }
}
