mod common;

use classifieds_api::{
    dto::{
        ads::{CreateAdRequest, NumberInput},
        favorites::ToggleFavoriteRequest,
        messages::SendMessageRequest,
        reviews::CreateReviewRequest,
    },
    entity::{Profiles, profiles},
    error::AppError,
    routes::params::{MessageQuery, Pagination},
    services::{ad_service, favorite_service, message_service, review_service},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

// Integration flow: favorites toggle, reviews with approval, and messaging.
#[tokio::test]
async fn favorites_reviews_and_messages_flow() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    common::create_category(&state, "cars", "Cars").await?;
    let seller = common::create_user(&state, "user", "seller@example.com").await?;
    let buyer = common::create_user(&state, "user", "buyer@example.com").await?;
    let second = common::create_user(&state, "user", "second@example.com").await?;
    let admin = common::create_user(&state, "admin", "admin@example.com").await?;

    let ad = ad_service::create_ad(
        &state,
        &seller,
        CreateAdRequest {
            title: Some("Kia Rio".into()),
            description: Some("Clean".into()),
            category: Some("cars".into()),
            ad_type: Some("SALE".into()),
            price: Some(NumberInput::Number(5_800.0)),
            location: Some("Aleppo".into()),
            phone: Some("+963900000009".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap()
    .ad;

    // Favorites: toggling twice returns to absent
    let toggle = || ToggleFavoriteRequest { ad_id: Some(ad.id) };
    let first = favorite_service::toggle_favorite(&state, &buyer, toggle()).await?;
    assert!(first.data.unwrap().favorited);
    let listed = favorite_service::list_favorites(&state, &buyer, Pagination::default()).await?;
    let items = listed.data.unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].counts.favorites, 1);

    let second_toggle = favorite_service::toggle_favorite(&state, &buyer, toggle()).await?;
    assert!(!second_toggle.data.unwrap().favorited);
    let listed = favorite_service::list_favorites(&state, &buyer, Pagination::default()).await?;
    assert_eq!(listed.meta.unwrap().total, Some(0));

    let err = favorite_service::toggle_favorite(
        &state,
        &buyer,
        ToggleFavoriteRequest {
            ad_id: Some(uuid::Uuid::new_v4()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // Reviews
    let review = |rating| CreateReviewRequest {
        rating,
        comment: Some("Honest seller".into()),
    };
    let err = review_service::create_review(&state, &seller, ad.id, review(5)).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let err = review_service::create_review(&state, &buyer, ad.id, review(6)).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let r1 = review_service::create_review(&state, &buyer, ad.id, review(5)).await?.data.unwrap();
    assert!(!r1.is_approved);
    let err = review_service::create_review(&state, &buyer, ad.id, review(4)).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let r2 = review_service::create_review(&state, &second, ad.id, review(4)).await?.data.unwrap();

    // unapproved reviews are hidden
    let detail = ad_service::get_ad(&state, ad.id).await?.data.unwrap();
    assert!(detail.reviews.is_empty());
    assert_eq!(detail.ad.counts.reviews, 0);

    let err = review_service::approve_review(&state, &buyer, r1.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    review_service::approve_review(&state, &admin, r1.id).await?;
    review_service::approve_review(&state, &admin, r2.id).await?;

    let profile = Profiles::find()
        .filter(profiles::Column::UserId.eq(seller.user_id))
        .one(&state.orm)
        .await?
        .unwrap();
    assert_eq!(profile.total_reviews, 2);
    assert_eq!(profile.rating, 4.5);

    let detail = ad_service::get_ad(&state, ad.id).await?.data.unwrap();
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.ad.counts.reviews, 2);

    // Messages
    let err = message_service::send_message(
        &state,
        &buyer,
        SendMessageRequest {
            recipient_id: Some(buyer.user_id),
            ad_id: None,
            content: Some("hi".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let sent = message_service::send_message(
        &state,
        &buyer,
        SendMessageRequest {
            recipient_id: Some(seller.user_id),
            ad_id: Some(ad.id),
            content: Some("  Is it still available?  ".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(sent.content, "Is it still available?");
    assert_eq!(sent.ad.as_ref().map(|a| a.id), Some(ad.id));

    message_service::send_message(
        &state,
        &second,
        SendMessageRequest {
            recipient_id: Some(seller.user_id),
            ad_id: None,
            content: Some("Price?".into()),
        },
    )
    .await?;

    let inbox = message_service::list_messages(&state, &seller, MessageQuery::default()).await?;
    assert_eq!(inbox.meta.unwrap().total, Some(2));

    let conversation = message_service::list_messages(
        &state,
        &seller,
        MessageQuery {
            with: Some(buyer.user_id),
            ..Default::default()
        },
    )
    .await?;
    let items = conversation.data.unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sender.as_ref().map(|s| s.id), Some(buyer.user_id));

    let err = message_service::mark_read(&state, &buyer, sent.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    let read = message_service::mark_read(&state, &seller, sent.id).await?.data.unwrap();
    assert!(read.is_read);

    Ok(())
}
