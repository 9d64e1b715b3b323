use axum::{
    Json, Router,
    extract::{Path, State},
    routing::put,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Review,
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/approve", put(approve_review))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review approved and seller rating refreshed", body = ApiResponse<Review>),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Review not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn approve_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::approve_review(&state, &user, id).await?;
    Ok(Json(resp))
}
