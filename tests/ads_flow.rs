mod common;

use classifieds_api::{
    dto::ads::{CarInput, CreateAdRequest, MediaInput, NumberInput, PropertyInput, UpdateAdRequest},
    entity::{
        CarDetails, PropertyDetails, car_details, property_details,
        sea_orm_active_enums::{AdType, PropertyType},
    },
    error::AppError,
    routes::params::{AdQuery, AdSort},
    services::{ad_query, ad_service, category_service},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

fn ad_request(category: &str, title: &str, ad_type: &str, price: f64) -> CreateAdRequest {
    CreateAdRequest {
        title: Some(title.into()),
        description: Some(format!("{title} in good shape")),
        category: Some(category.into()),
        ad_type: Some(ad_type.into()),
        price: Some(NumberInput::Number(price)),
        location: Some("Damascus".into()),
        phone: Some("+963991112233".into()),
        ..Default::default()
    }
}

async fn detail_rows(state: &classifieds_api::state::AppState, ad_id: Uuid) -> anyhow::Result<(u64, u64)> {
    let property = PropertyDetails::find()
        .filter(property_details::Column::AdId.eq(ad_id))
        .count(&state.orm)
        .await?;
    let car = CarDetails::find()
        .filter(car_details::Column::AdId.eq(ad_id))
        .count(&state.orm)
        .await?;
    Ok((property, car))
}

// Integration flow: create ads per category, filter, sort, view, update and delete.
#[tokio::test]
async fn ad_lifecycle_and_listing_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    common::create_category(&state, "real-estate", "Real Estate").await?;
    common::create_category(&state, "cars", "Cars").await?;
    let categories = category_service::list_categories(&state).await?.data.unwrap().items;
    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["cars", "real-estate"]);

    let seller = common::create_user(&state, "user", "seller@example.com").await?;
    let other = common::create_user(&state, "user", "other@example.com").await?;
    let admin = common::create_user(&state, "admin", "admin@example.com").await?;

    // Missing fields are rejected before anything is written
    let mut incomplete = ad_request("cars", "No phone", "SALE", 1.0);
    incomplete.phone = None;
    let err = ad_service::create_ad(&state, &seller, incomplete).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = ad_service::create_ad(&state, &seller, ad_request("boats", "Boat", "SALE", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Real estate gets exactly one property row
    let mut flat = ad_request("real-estate", "Flat in Mezzeh", "RENT", 400_000.0);
    flat.property_data = Some(PropertyInput {
        property_type: Some("VILLA".into()),
        bedrooms: Some(NumberInput::Text("3".into())),
        ..Default::default()
    });
    flat.media = vec![
        MediaInput {
            url: "/uploads/a.jpg".into(),
            content_type: Some("image/jpeg".into()),
            name: None,
            size: Some(10),
        },
        MediaInput {
            url: "/uploads/b.mp4".into(),
            content_type: Some("video/mp4".into()),
            name: None,
            size: Some(20),
        },
    ];
    let flat = ad_service::create_ad(&state, &seller, flat).await?.data.unwrap();
    assert_eq!(detail_rows(&state, flat.ad.id).await?, (1, 0));
    let property = flat.property_details.unwrap();
    assert_eq!(property.property_type, PropertyType::Villa);
    assert_eq!(property.bedrooms, Some(3));
    assert_eq!(flat.ad.media.len(), 2);
    assert_eq!(flat.ad.media.iter().filter(|m| m.is_primary).count(), 1);
    assert!(flat.ad.media[0].is_primary);

    // Cars get exactly one car row, even without a car section
    let corolla = ad_service::create_ad(&state, &seller, ad_request("cars", "Corolla", "SALE", 12_000.0))
        .await?
        .data
        .unwrap();
    assert_eq!(detail_rows(&state, corolla.ad.id).await?, (0, 1));
    assert_eq!(corolla.car_details.unwrap().brand, "Other");

    let mut tucson = ad_request("cars", "Tucson", "SALE", 21_000.0);
    tucson.car_data = Some(CarInput {
        brand: Some("Hyundai".into()),
        model: Some("Tucson".into()),
        ..Default::default()
    });
    let tucson = ad_service::create_ad(&state, &seller, tucson).await?.data.unwrap();
    let rio = ad_service::create_ad(&state, &seller, ad_request("cars", "Rio", "RENT", 500.0))
        .await?
        .data
        .unwrap();

    // Only admins may feature
    let feature = || UpdateAdRequest {
        is_featured: Some(true),
        ..Default::default()
    };
    let err = ad_service::update_ad(&state, &seller, tucson.ad.id, feature()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    ad_service::update_ad(&state, &admin, tucson.ad.id, feature()).await?;

    // Other users cannot edit
    let err = ad_service::update_ad(
        &state,
        &other,
        corolla.ad.id,
        UpdateAdRequest {
            title: Some("Mine now".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // category=cars&type=SALE
    let listed = ad_query::list_ads(
        &state,
        AdQuery {
            category: Some("cars".into()),
            type_param: Some(AdType::Sale),
            ..Default::default()
        },
    )
    .await?;
    let meta = listed.meta.unwrap();
    let items = listed.data.unwrap().items;
    assert_eq!(meta.total, Some(2));
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|a| a.ad_type == AdType::Sale
        && a.category.as_ref().map(|c| c.slug.as_str()) == Some("cars")));
    assert!(items.iter().all(|a| a.id != rio.ad.id));

    // price_low keeps featured first, then non-decreasing prices
    let sorted = ad_query::list_ads(
        &state,
        AdQuery {
            sort: Some(AdSort::PriceLow),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap()
    .items;
    assert_eq!(sorted.len(), 4);
    assert_eq!(sorted[0].id, tucson.ad.id);
    let rest: Vec<f64> = sorted[1..].iter().map(|a| a.price).collect();
    assert!(rest.windows(2).all(|w| w[0] <= w[1]), "{rest:?}");

    // Viewing counts atomically
    ad_service::get_ad(&state, corolla.ad.id).await?;
    let viewed = ad_service::get_ad(&state, corolla.ad.id).await?.data.unwrap();
    assert_eq!(viewed.ad.views_count, 2);
    assert!(matches!(
        ad_service::get_ad(&state, Uuid::new_v4()).await.unwrap_err(),
        AppError::NotFound
    ));

    // Deactivated ads leave the public listing but stay in the owner's list
    ad_service::update_ad(
        &state,
        &seller,
        rio.ad.id,
        UpdateAdRequest {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await?;
    let public = ad_query::list_ads(&state, AdQuery::default()).await?;
    assert_eq!(public.meta.unwrap().total, Some(3));
    let mine = ad_query::list_user_ads(&state, &seller, Default::default()).await?;
    assert_eq!(mine.meta.unwrap().total, Some(4));

    // Delete cascades details
    let err = ad_service::delete_ad(&state, &other, flat.ad.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    ad_service::delete_ad(&state, &seller, flat.ad.id).await?;
    assert_eq!(detail_rows(&state, flat.ad.id).await?, (0, 0));
    assert!(matches!(
        ad_service::get_ad(&state, flat.ad.id).await.unwrap_err(),
        AppError::NotFound
    ));

    Ok(())
}
