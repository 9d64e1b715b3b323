use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        ads::{AdList, CreateAdRequest, UpdateAdRequest},
        reviews::CreateReviewRequest,
    },
    error::AppResult,
    extract::ApiJson,
    middleware::auth::AuthUser,
    models::{AdDetail, Review},
    response::ApiResponse,
    routes::params::AdQuery,
    services::{ad_query, ad_service, review_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ads).post(create_ad))
        .route("/{id}", get(get_ad).put(update_ad).delete(delete_ad))
        .route("/{id}/reviews", post(create_review))
}

#[utoipa::path(
    get,
    path = "/api/ads",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, default 12"),
        ("category" = Option<String>, Query, description = "Category slug"),
        ("type" = Option<String>, Query, description = "SALE, RENT or WANTED"),
        ("search" = Option<String>, Query, description = "Matches title, description or location"),
        ("min_price" = Option<f64>, Query, description = "Lower price bound"),
        ("max_price" = Option<f64>, Query, description = "Upper price bound"),
        ("condition" = Option<String>, Query, description = "Item condition"),
        ("featured" = Option<String>, Query, description = "`true` lists featured ads only"),
        ("sort" = Option<String>, Query, description = "newest, oldest, price_low, price_high, views, featured"),
    ),
    responses(
        (status = 200, description = "List active ads", body = ApiResponse<AdList>)
    ),
    tag = "Ads"
)]
pub async fn list_ads(
    State(state): State<AppState>,
    Query(query): Query<AdQuery>,
) -> AppResult<Json<ApiResponse<AdList>>> {
    let resp = ad_query::list_ads(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/ads",
    request_body = CreateAdRequest,
    responses(
        (status = 201, description = "Ad created", body = ApiResponse<AdDetail>),
        (status = 400, description = "Missing or invalid fields, unknown category"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Ads"
)]
pub async fn create_ad(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<CreateAdRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdDetail>>)> {
    let resp = ad_service::create_ad(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Ad detail; counts one view", body = ApiResponse<AdDetail>),
        (status = 404, description = "Ad not found")
    ),
    tag = "Ads"
)]
pub async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AdDetail>>> {
    let resp = ad_service::get_ad(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    request_body = UpdateAdRequest,
    responses(
        (status = 200, description = "Ad updated", body = ApiResponse<AdDetail>),
        (status = 403, description = "Not the owner, or featuring without admin role"),
        (status = 404, description = "Ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Ads"
)]
pub async fn update_ad(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateAdRequest>,
) -> AppResult<Json<ApiResponse<AdDetail>>> {
    let resp = ad_service::update_ad(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/ads/{id}",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    responses(
        (status = 200, description = "Ad deleted", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Ads"
)]
pub async fn delete_ad(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = ad_service::delete_ad(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/ads/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Ad ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review submitted for approval", body = ApiResponse<Review>),
        (status = 400, description = "Invalid rating, own ad or duplicate review"),
        (status = 404, description = "Ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let resp = review_service::create_review(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
