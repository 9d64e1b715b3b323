use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    ad_media, ads, car_details, categories, messages, profiles, property_details, reviews,
    sea_orm_active_enums::{
        AdType, BodyType, DrivetrainType, FuelType, FurnishedType, HeatingType, ItemCondition,
        MediaType, ProfileType, PropertyType, TransmissionType,
    },
    users,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name_ar: String,
    pub name_en: String,
    pub icon: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub profile_type: ProfileType,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub total_reviews: i32,
}

/// Account as seen by its owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub profile: Option<Profile>,
}

/// Public seller card attached to listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_verified: bool,
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Media {
    pub id: Uuid,
    pub url: String,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub media_type: MediaType,
    pub is_primary: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdCounts {
    pub favorites: i64,
    pub reviews: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ad {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ad_type: AdType,
    pub condition: Option<ItemCondition>,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub contact_phone: String,
    pub contact_whatsapp: Option<String>,
    pub contact_email: Option<String>,
    pub features: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<Category>,
    pub user: Option<Seller>,
    pub media: Vec<Media>,
    pub counts: AdCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyDetails {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarDetails {
    pub brand: String,
    pub model: String,
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reviewer {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub ad_id: Uuid,
    pub seller_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub reviewer: Option<Reviewer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdDetail {
    #[serde(flatten)]
    pub ad: Ad,
    pub property_details: Option<PropertyDetails>,
    pub car_details: Option<CarDetails>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdRef {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub sender: Option<Participant>,
    pub recipient: Option<Participant>,
    pub ad: Option<AdRef>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            name_ar: model.name_ar,
            name_en: model.name_en,
            icon: model.icon,
            is_active: model.is_active,
        }
    }
}

impl From<profiles::Model> for Profile {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: model.id,
            profile_type: model.profile_type,
            company_name: model.company_name,
            description: model.description,
            location: model.location,
            website: model.website,
            rating: model.rating,
            total_reviews: model.total_reviews,
        }
    }
}

impl User {
    pub fn from_entity(model: users::Model, profile: Option<profiles::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            avatar: model.avatar,
            role: model.role,
            is_verified: model.is_verified,
            created_at: model.created_at.with_timezone(&Utc),
            profile: profile.map(Profile::from),
        }
    }
}

impl Seller {
    pub fn from_entity(model: users::Model, profile: Option<profiles::Model>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            avatar: model.avatar,
            is_verified: model.is_verified,
            profile: profile.map(Profile::from),
        }
    }
}

impl From<ad_media::Model> for Media {
    fn from(model: ad_media::Model) -> Self {
        Self {
            id: model.id,
            url: model.file_path,
            file_name: model.file_name,
            file_size: model.file_size,
            media_type: model.media_type,
            is_primary: model.is_primary,
            sort_order: model.sort_order,
        }
    }
}

impl Ad {
    /// Builds the listing shape without relations; callers attach them.
    pub fn from_entity(model: ads::Model) -> Self {
        let features = serde_json::from_value(model.features).unwrap_or_default();
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            ad_type: model.ad_type,
            condition: model.condition,
            price: model.price,
            currency: model.currency,
            location: model.location,
            contact_phone: model.contact_phone,
            contact_whatsapp: model.contact_whatsapp,
            contact_email: model.contact_email,
            features,
            is_active: model.is_active,
            is_featured: model.is_featured,
            views_count: model.views_count,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            category: None,
            user: None,
            media: Vec::new(),
            counts: AdCounts::default(),
        }
    }
}

impl From<property_details::Model> for PropertyDetails {
    fn from(model: property_details::Model) -> Self {
        Self {
            property_type: model.property_type,
            area: model.area,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            floor: model.floor,
            total_floors: model.total_floors,
            build_year: model.build_year,
            has_garage: model.has_garage,
            has_garden: model.has_garden,
            has_elevator: model.has_elevator,
            has_security: model.has_security,
            has_pool: model.has_pool,
            has_balcony: model.has_balcony,
            furnished: model.furnished,
            heating_type: model.heating_type,
        }
    }
}

impl From<car_details::Model> for CarDetails {
    fn from(model: car_details::Model) -> Self {
        Self {
            brand: model.brand,
            model: model.model_name,
            year: model.year,
            mileage: model.mileage,
            fuel_type: model.fuel_type,
            transmission: model.transmission,
            engine_size: model.engine_size,
            horse_power: model.horse_power,
            color: model.color,
            body_type: model.body_type,
            drivetrain: model.drivetrain,
            has_air_conditioning: model.has_air_conditioning,
            has_leather_seats: model.has_leather_seats,
            has_sunroof: model.has_sunroof,
            has_navigation_system: model.has_navigation_system,
            has_bluetooth_connectivity: model.has_bluetooth_connectivity,
            has_parking_sensors: model.has_parking_sensors,
            has_backup_camera: model.has_backup_camera,
        }
    }
}

impl Review {
    pub fn from_entity(model: reviews::Model, reviewer: Option<users::Model>) -> Self {
        Self {
            id: model.id,
            ad_id: model.ad_id,
            seller_id: model.seller_id,
            rating: model.rating,
            comment: model.comment,
            is_approved: model.is_approved,
            created_at: model.created_at.with_timezone(&Utc),
            reviewer: reviewer.map(|u| Reviewer {
                id: u.id,
                name: u.name,
                avatar: u.avatar,
            }),
        }
    }
}

impl From<&users::Model> for Participant {
    fn from(model: &users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            email: model.email.clone(),
        }
    }
}

impl Message {
    pub fn from_entity(model: messages::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            is_read: model.is_read,
            created_at: model.created_at.with_timezone(&Utc),
            sender: None,
            recipient: None,
            ad: None,
        }
    }
}
