mod common;

use classifieds_api::{
    dto::{
        ads::{CreateAdRequest, NumberInput},
        auth::SignupRequest,
        reviews::CreateReviewRequest,
    },
    error::{AppError, AppResult},
    services::{ad_service, auth_service, review_service},
};

fn split<T>(results: [AppResult<T>; 2]) -> (usize, Vec<String>) {
    let mut ok = 0;
    let mut rejected = Vec::new();
    for result in results {
        match result {
            Ok(_) => ok += 1,
            Err(AppError::BadRequest(reason)) => rejected.push(reason),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    (ok, rejected)
}

// Concurrent duplicate signups and reviews: one wins, the other gets a 400.
#[tokio::test]
async fn concurrent_duplicates_are_bad_requests() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&database_url).await?;

    let signup = || SignupRequest {
        name: Some("Lina".into()),
        email: Some("lina@example.com".into()),
        phone: Some("+963911111111".into()),
        password: Some("secret1".into()),
        profile_type: Some("PERSONAL".into()),
        company_name: None,
    };
    let (a, b) = tokio::join!(
        auth_service::signup(&state, signup()),
        auth_service::signup(&state, signup())
    );
    let (ok, rejected) = split([a, b]);
    assert_eq!(ok, 1);
    assert_eq!(rejected, vec!["Email or phone is already taken".to_string()]);

    common::create_category(&state, "cars", "Cars").await?;
    let seller = common::create_user(&state, "user", "seller@example.com").await?;
    let buyer = common::create_user(&state, "user", "buyer@example.com").await?;

    let ad = ad_service::create_ad(
        &state,
        &seller,
        CreateAdRequest {
            title: Some("Hyundai Accent".into()),
            description: Some("One owner".into()),
            category: Some("cars".into()),
            ad_type: Some("SALE".into()),
            price: Some(NumberInput::Number(4_200.0)),
            location: Some("Homs".into()),
            phone: Some("+963900000010".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap()
    .ad;

    let review = || CreateReviewRequest {
        rating: 4,
        comment: None,
    };
    let (a, b) = tokio::join!(
        review_service::create_review(&state, &buyer, ad.id, review()),
        review_service::create_review(&state, &buyer, ad.id, review())
    );
    let (ok, rejected) = split([a, b]);
    assert_eq!(ok, 1);
    assert_eq!(rejected, vec!["You have already reviewed this ad".to_string()]);

    Ok(())
}
