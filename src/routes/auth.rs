use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{SigninRequest, SigninResponse, SignupRequest},
    error::AppResult,
    extract::ApiJson,
    models::User,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User and profile created", body = ApiResponse<User>),
        (status = 400, description = "Missing fields, short password or email/phone taken")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::signup(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<SigninResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn signin(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SigninRequest>,
) -> AppResult<Json<ApiResponse<SigninResponse>>> {
    let resp = auth_service::signin(&state, payload).await?;
    Ok(Json(resp))
}
