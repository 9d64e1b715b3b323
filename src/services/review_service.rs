use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::reviews::CreateReviewRequest,
    entity::{
        ads::Entity as Ads,
        profiles::{self, Entity as Profiles},
        reviews::{self, Entity as Reviews},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Review,
    response::{ApiResponse, Meta},
    state::AppState,
};

const ALREADY_REVIEWED: &str = "You have already reviewed this ad";

/// Average rounded to one decimal and the number of ratings.
pub fn summarize_ratings(ratings: &[i32]) -> (f64, i32) {
    if ratings.is_empty() {
        return (0.0, 0);
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let avg = sum as f64 / ratings.len() as f64;
    ((avg * 10.0).round() / 10.0, ratings.len() as i32)
}

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    ad_id: Uuid,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::bad_request("Rating must be between 1 and 5"));
    }

    let ad = Ads::find_by_id(ad_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if ad.user_id == user.user_id {
        return Err(AppError::bad_request("You cannot review your own ad"));
    }

    let already = Reviews::find()
        .filter(reviews::Column::ReviewerId.eq(user.user_id))
        .filter(reviews::Column::AdId.eq(ad_id))
        .one(&state.orm)
        .await?;
    if already.is_some() {
        return Err(AppError::bad_request(ALREADY_REVIEWED));
    }

    let comment = payload
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        ad_id: Set(ad_id),
        reviewer_id: Set(user.user_id),
        seller_id: Set(ad.user_id),
        rating: Set(payload.rating),
        comment: Set(comment),
        is_approved: Set(false),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|e| AppError::unique_violation(e, ALREADY_REVIEWED))?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "review_create",
        "reviews",
        serde_json::json!({ "review_id": review.id, "ad_id": ad_id }),
    )
    .await;

    let reviewer = Users::find_by_id(user.user_id).one(&state.orm).await?;
    Ok(ApiResponse::success(
        "Review submitted for approval",
        Review::from_entity(review, reviewer),
        Some(Meta::empty()),
    ))
}

async fn refresh_seller_rating<C: ConnectionTrait>(db: &C, seller_id: Uuid) -> AppResult<()> {
    let ratings: Vec<i32> = Reviews::find()
        .select_only()
        .column(reviews::Column::Rating)
        .filter(reviews::Column::SellerId.eq(seller_id))
        .filter(reviews::Column::IsApproved.eq(true))
        .into_tuple()
        .all(db)
        .await?;

    let (rating, total) = summarize_ratings(&ratings);

    let result = Profiles::update_many()
        .col_expr(profiles::Column::Rating, Expr::value(rating))
        .col_expr(profiles::Column::TotalReviews, Expr::value(total))
        .filter(profiles::Column::UserId.eq(seller_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        tracing::warn!(%seller_id, "seller has no profile; rating not stored");
    }
    Ok(())
}

pub async fn approve_review(
    state: &AppState,
    user: &AuthUser,
    review_id: Uuid,
) -> AppResult<ApiResponse<Review>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;

    let review = Reviews::find_by_id(review_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let review = if review.is_approved {
        review
    } else {
        let mut active: reviews::ActiveModel = review.into();
        active.is_approved = Set(true);
        active.update(&txn).await?
    };

    refresh_seller_rating(&txn, review.seller_id).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "review_approve",
        "reviews",
        serde_json::json!({ "review_id": review.id, "seller_id": review.seller_id }),
    )
    .await;

    let reviewer = Users::find_by_id(review.reviewer_id).one(&state.orm).await?;
    Ok(ApiResponse::success(
        "Review approved",
        Review::from_entity(review, reviewer),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::summarize_ratings;

    #[test]
    fn empty_ratings_reset_profile() {
        assert_eq!(summarize_ratings(&[]), (0.0, 0));
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        assert_eq!(summarize_ratings(&[5, 4, 4]), (4.3, 3));
        assert_eq!(summarize_ratings(&[5, 4]), (4.5, 2));
        assert_eq!(summarize_ratings(&[1]), (1.0, 1));
    }
}
