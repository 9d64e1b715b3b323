use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    dto::{
        ads::AdList,
        favorites::{FavoriteState, ToggleFavoriteRequest},
    },
    error::AppResult,
    extract::ApiJson,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::favorite_service,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/user/favorites",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Favorited ads, newest first", body = ApiResponse<AdList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AdList>>> {
    let resp = favorite_service::list_favorites(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/favorites",
    request_body = ToggleFavoriteRequest,
    responses(
        (status = 200, description = "Favorite toggled", body = ApiResponse<FavoriteState>),
        (status = 400, description = "Missing ad_id"),
        (status = 404, description = "Ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Favorites"
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<ToggleFavoriteRequest>,
) -> AppResult<Json<ApiResponse<FavoriteState>>> {
    let resp = favorite_service::toggle_favorite(&state, &user, payload).await?;
    Ok(Json(resp))
}
