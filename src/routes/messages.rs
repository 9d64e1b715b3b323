use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::messages::{MessageList, SendMessageRequest},
    error::AppResult,
    extract::ApiJson,
    middleware::auth::AuthUser,
    models::Message,
    response::ApiResponse,
    routes::params::MessageQuery,
    services::message_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages).post(send_message))
        .route("/{id}/read", put(mark_read))
}

#[utoipa::path(
    get,
    path = "/api/messages",
    params(
        ("with" = Option<Uuid>, Query, description = "Only the conversation with this user"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Messages, newest first", body = ApiResponse<MessageList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MessageQuery>,
) -> AppResult<Json<ApiResponse<MessageList>>> {
    let resp = message_service::list_messages(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = ApiResponse<Message>),
        (status = 400, description = "Empty content or messaging yourself"),
        (status = 404, description = "Recipient or ad not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Message>>)> {
    let resp = message_service::send_message(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/messages/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<Message>),
        (status = 404, description = "No such message addressed to the caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Messages"
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Message>>> {
    let resp = message_service::mark_read(&state, &user, id).await?;
    Ok(Json(resp))
}
