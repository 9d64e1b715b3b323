use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::ads::AdList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::{favorites, params::Pagination},
    services::ad_query,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::toggle_favorite),
        )
        .route("/ads", get(list_user_ads))
}

#[utoipa::path(
    get,
    path = "/api/user/ads",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "The caller's ads, inactive included", body = ApiResponse<AdList>)
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn list_user_ads(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AdList>>> {
    let resp = ad_query::list_user_ads(&state, &user, pagination).await?;
    Ok(Json(resp))
}
