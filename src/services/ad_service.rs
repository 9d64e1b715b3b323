use std::collections::HashMap;

use chrono::{Datelike, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::ads::{CarInput, CreateAdRequest, MediaInput, PropertyInput, UpdateAdRequest},
    entity::{
        ad_media::{self, Entity as AdMedia},
        ads::{self, Column, Entity as Ads},
        car_details::{self, Entity as CarDetails},
        categories::{self, Entity as Categories},
        property_details::{self, Entity as PropertyDetails},
        reviews::{self, Entity as Reviews},
        sea_orm_active_enums::{
            AdType, BodyType, DrivetrainType, FuelType, FurnishedType, HeatingType, ItemCondition,
            MediaType, PropertyType, TransmissionType, parse_enum,
        },
        users::{self, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner_or_admin},
    models::{AdDetail, Review},
    response::{ApiResponse, Meta},
    services::ad_query::{MediaScope, hydrate},
    state::AppState,
};

pub const REAL_ESTATE_SLUG: &str = "real-estate";
pub const CARS_SLUG: &str = "cars";

/// Category-specific attribute table an ad gets, decided by category slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Property,
    Car,
    Generic,
}

impl DetailKind {
    pub fn for_slug(slug: &str) -> Self {
        match slug {
            REAL_ESTATE_SLUG => DetailKind::Property,
            CARS_SLUG => DetailKind::Car,
            _ => DetailKind::Generic,
        }
    }
}

/// Fields of a create request after presence and format checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAd {
    pub title: String,
    pub description: String,
    pub category: String,
    pub ad_type: AdType,
    pub condition: Option<ItemCondition>,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn validate_create(payload: &CreateAdRequest) -> AppResult<ValidatedAd> {
    let (
        Some(title),
        Some(description),
        Some(category),
        Some(ad_type),
        Some(location),
        Some(phone),
        Some(price),
    ) = (
        required(&payload.title),
        required(&payload.description),
        required(&payload.category),
        required(&payload.ad_type),
        required(&payload.location),
        required(&payload.phone),
        payload.price.as_ref(),
    )
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    let price = price
        .as_f64()
        .filter(|p| *p >= 0.0)
        .ok_or_else(|| AppError::bad_request("Invalid price"))?;

    let ad_type = parse_enum::<AdType>(&ad_type)
        .ok_or_else(|| AppError::bad_request(format!("Unknown ad type {ad_type}")))?;

    let condition = match required(&payload.condition) {
        Some(raw) => Some(
            parse_enum::<ItemCondition>(&raw)
                .ok_or_else(|| AppError::bad_request(format!("Unknown condition {raw}")))?,
        ),
        None => None,
    };

    Ok(ValidatedAd {
        title,
        description,
        category,
        ad_type,
        condition,
        price,
        currency: required(&payload.currency).unwrap_or_else(|| "SYP".to_string()),
        location,
        phone,
        whatsapp: optional(payload.whatsapp.clone()),
        email: optional(payload.email.clone()),
    })
}

pub fn property_details_model(ad_id: Uuid, input: &PropertyInput) -> property_details::ActiveModel {
    let int = |v: &Option<crate::dto::ads::NumberInput>| v.as_ref().and_then(|n| n.as_i32());
    property_details::ActiveModel {
        id: Set(Uuid::new_v4()),
        ad_id: Set(ad_id),
        property_type: Set(input
            .property_type
            .as_deref()
            .and_then(parse_enum)
            .unwrap_or(PropertyType::Apartment)),
        area: Set(int(&input.area)),
        bedrooms: Set(int(&input.bedrooms)),
        bathrooms: Set(int(&input.bathrooms)),
        floor: Set(int(&input.floor)),
        total_floors: Set(int(&input.total_floors)),
        build_year: Set(int(&input.build_year)),
        has_garage: Set(input.has_garage.unwrap_or(false)),
        has_garden: Set(input.has_garden.unwrap_or(false)),
        has_elevator: Set(input.has_elevator.unwrap_or(false)),
        has_security: Set(input.has_security.unwrap_or(false)),
        has_pool: Set(input.has_pool.unwrap_or(false)),
        has_balcony: Set(input.has_balcony.unwrap_or(false)),
        furnished: Set(Some(if input.furnished.unwrap_or(false) {
            FurnishedType::Furnished
        } else {
            FurnishedType::Unfurnished
        })),
        heating_type: Set(input
            .heating_type
            .as_deref()
            .and_then(parse_enum::<HeatingType>)
            .or_else(|| input.heating.filter(|h| *h).map(|_| HeatingType::Central))),
    }
}

pub fn car_details_model(ad_id: Uuid, input: &CarInput) -> car_details::ActiveModel {
    let text = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    car_details::ActiveModel {
        id: Set(Uuid::new_v4()),
        ad_id: Set(ad_id),
        brand: Set(text(&input.brand).unwrap_or_else(|| "Other".to_string())),
        model_name: Set(text(&input.model).unwrap_or_else(|| "Unknown".to_string())),
        year: Set(input
            .year
            .as_ref()
            .and_then(|y| y.as_i32())
            .unwrap_or_else(|| Utc::now().year())),
        mileage: Set(input.mileage.as_ref().and_then(|m| m.as_i32())),
        fuel_type: Set(input
            .fuel_type
            .as_deref()
            .and_then(parse_enum)
            .unwrap_or(FuelType::Gasoline)),
        transmission: Set(input
            .transmission
            .as_deref()
            .and_then(parse_enum)
            .unwrap_or(TransmissionType::Manual)),
        engine_size: Set(input.engine_size.as_ref().and_then(|e| e.as_f64())),
        horse_power: Set(input.horse_power.as_ref().and_then(|h| h.as_i32())),
        color: Set(text(&input.color)),
        body_type: Set(input
            .body_type
            .as_deref()
            .and_then(parse_enum)
            .unwrap_or(BodyType::Sedan)),
        drivetrain: Set(input
            .drivetrain
            .as_deref()
            .and_then(parse_enum::<DrivetrainType>)),
        has_air_conditioning: Set(input.has_air_conditioning.unwrap_or(false)),
        has_leather_seats: Set(input.has_leather_seats.unwrap_or(false)),
        has_sunroof: Set(input.has_sunroof.unwrap_or(false)),
        has_navigation_system: Set(input.has_navigation_system.unwrap_or(false)),
        has_bluetooth_connectivity: Set(input.has_bluetooth_connectivity.unwrap_or(false)),
        has_parking_sensors: Set(input.has_parking_sensors.unwrap_or(false)),
        has_backup_camera: Set(input.has_backup_camera.unwrap_or(false)),
    }
}

/// First item becomes the primary media; order follows the request.
pub fn media_models(ad_id: Uuid, media: &[MediaInput]) -> Vec<ad_media::ActiveModel> {
    media
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let is_video = item
                .content_type
                .as_deref()
                .is_some_and(|t| t.starts_with("video/"));
            ad_media::ActiveModel {
                id: Set(Uuid::new_v4()),
                ad_id: Set(ad_id),
                file_path: Set(item.url.clone()),
                file_name: Set(item.name.clone()),
                file_size: Set(item.size),
                media_type: Set(if is_video {
                    MediaType::Video
                } else {
                    MediaType::Image
                }),
                is_primary: Set(index == 0),
                sort_order: Set(index as i32),
                created_at: NotSet,
            }
        })
        .collect()
}

async fn resolve_category<C: ConnectionTrait>(
    db: &C,
    key: &str,
) -> AppResult<Option<categories::Model>> {
    let mut condition = Condition::any().add(categories::Column::Slug.eq(key));
    if let Ok(id) = Uuid::parse_str(key) {
        condition = condition.add(categories::Column::Id.eq(id));
    }
    Ok(Categories::find().filter(condition).one(db).await?)
}

pub async fn create_ad(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAdRequest,
) -> AppResult<ApiResponse<AdDetail>> {
    let valid = validate_create(&payload)?;

    let category = resolve_category(&state.orm, &valid.category)
        .await?
        .ok_or_else(|| AppError::bad_request("Category not found"))?;

    let txn = state.orm.begin().await?;

    let ad = ads::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        category_id: Set(category.id),
        title: Set(valid.title),
        description: Set(valid.description),
        ad_type: Set(valid.ad_type),
        condition: Set(valid.condition),
        price: Set(valid.price),
        currency: Set(valid.currency),
        location: Set(valid.location),
        contact_phone: Set(valid.phone),
        contact_whatsapp: Set(valid.whatsapp),
        contact_email: Set(valid.email),
        features: Set(serde_json::json!(payload.features)),
        is_active: Set(true),
        is_featured: Set(false),
        views_count: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    match DetailKind::for_slug(&category.slug) {
        DetailKind::Property => {
            let input = payload.property_data.unwrap_or_default();
            property_details_model(ad.id, &input).insert(&txn).await?;
        }
        DetailKind::Car => {
            let input = payload.car_data.unwrap_or_default();
            car_details_model(ad.id, &input).insert(&txn).await?;
        }
        DetailKind::Generic => {}
    }

    let media = media_models(ad.id, &payload.media);
    if !media.is_empty() {
        AdMedia::insert_many(media).exec(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(ad_id = %ad.id, category = %category.slug, "ad created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "ad_create",
        "ads",
        serde_json::json!({ "ad_id": ad.id }),
    )
    .await;

    let detail = load_detail(&state.orm, ad).await?;
    Ok(ApiResponse::success("Ad created", detail, Some(Meta::empty())))
}

/// Returns the ad with every relation and counts one more view.
pub async fn get_ad(state: &AppState, id: Uuid) -> AppResult<ApiResponse<AdDetail>> {
    let result = Ads::update_many()
        .col_expr(Column::ViewsCount, Expr::col(Column::ViewsCount).add(1))
        .filter(Column::Id.eq(id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    let ad = Ads::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let detail = load_detail(&state.orm, ad).await?;
    Ok(ApiResponse::success("Ad", detail, None))
}

pub async fn load_detail<C: ConnectionTrait>(db: &C, ad: ads::Model) -> AppResult<AdDetail> {
    let ad_id = ad.id;

    let property_details = PropertyDetails::find()
        .filter(property_details::Column::AdId.eq(ad_id))
        .one(db)
        .await?
        .map(Into::into);

    let car_details = CarDetails::find()
        .filter(car_details::Column::AdId.eq(ad_id))
        .one(db)
        .await?
        .map(Into::into);

    let rows = Reviews::find()
        .filter(reviews::Column::AdId.eq(ad_id))
        .filter(reviews::Column::IsApproved.eq(true))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await?;

    // reviews point at users twice, so reviewers are loaded by id
    let reviewer_ids: Vec<Uuid> = rows.iter().map(|r| r.reviewer_id).collect();
    let reviewers: HashMap<Uuid, users::Model> = if reviewer_ids.is_empty() {
        HashMap::new()
    } else {
        Users::find()
            .filter(users::Column::Id.is_in(reviewer_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };
    let reviews = rows
        .into_iter()
        .map(|review| {
            let reviewer = reviewers.get(&review.reviewer_id).cloned();
            Review::from_entity(review, reviewer)
        })
        .collect();

    let ad = hydrate(db, vec![ad], MediaScope::All)
        .await?
        .pop()
        .ok_or(AppError::NotFound)?;

    Ok(AdDetail {
        ad,
        property_details,
        car_details,
        reviews,
    })
}

pub async fn update_ad(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAdRequest,
) -> AppResult<ApiResponse<AdDetail>> {
    let existing = Ads::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, existing.user_id)?;

    if payload.is_featured.is_some() && !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    let mut active: ads::ActiveModel = existing.into();
    if let Some(title) = required(&payload.title) {
        active.title = Set(title);
    }
    if let Some(description) = required(&payload.description) {
        active.description = Set(description);
    }
    if let Some(raw) = required(&payload.ad_type) {
        let ad_type = parse_enum::<AdType>(&raw)
            .ok_or_else(|| AppError::bad_request(format!("Unknown ad type {raw}")))?;
        active.ad_type = Set(ad_type);
    }
    if let Some(raw) = required(&payload.condition) {
        let condition = parse_enum::<ItemCondition>(&raw)
            .ok_or_else(|| AppError::bad_request(format!("Unknown condition {raw}")))?;
        active.condition = Set(Some(condition));
    }
    if let Some(price) = payload.price.as_ref() {
        let price = price
            .as_f64()
            .filter(|p| *p >= 0.0)
            .ok_or_else(|| AppError::bad_request("Invalid price"))?;
        active.price = Set(price);
    }
    if let Some(currency) = required(&payload.currency) {
        active.currency = Set(currency);
    }
    if let Some(location) = required(&payload.location) {
        active.location = Set(location);
    }
    if let Some(phone) = required(&payload.phone) {
        active.contact_phone = Set(phone);
    }
    if payload.whatsapp.is_some() {
        active.contact_whatsapp = Set(optional(payload.whatsapp));
    }
    if payload.email.is_some() {
        active.contact_email = Set(optional(payload.email));
    }
    if let Some(features) = payload.features {
        active.features = Set(serde_json::json!(features));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_featured) = payload.is_featured {
        active.is_featured = Set(is_featured);
    }
    active.updated_at = Set(Utc::now().into());

    let ad = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "ad_update",
        "ads",
        serde_json::json!({ "ad_id": ad.id }),
    )
    .await;

    let detail = load_detail(&state.orm, ad).await?;
    Ok(ApiResponse::success("Updated", detail, Some(Meta::empty())))
}

pub async fn delete_ad(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = Ads::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner_or_admin(user, existing.user_id)?;

    let result = Ads::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "ad_delete",
        "ads",
        serde_json::json!({ "ad_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "success": true }),
        Some(Meta::empty()),
    ))
}
