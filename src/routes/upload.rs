use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::post,
};

use crate::{
    audit,
    dto::upload::{DeleteUploadQuery, UploadResponse},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::upload_service::{self, MAX_VIDEO_BYTES},
    state::AppState,
};

// multipart framing on top of the largest accepted file
const UPLOAD_BODY_LIMIT: usize = MAX_VIDEO_BYTES as usize + 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file).delete(delete_file))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = String, content_type = "multipart/form-data", description = "Form with a single `file` field"),
    responses(
        (status = 200, description = "File stored", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Missing file, disallowed type, oversize or mismatched content")
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadResponse>>> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        file = Some((content_type, data));
        break;
    }

    let (content_type, data) = file.ok_or_else(|| AppError::bad_request("No file provided"))?;
    let stored = upload_service::store_upload(&state.config.upload_dir, &content_type, &data).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "upload_create",
        "uploads",
        serde_json::json!({ "filename": stored.filename, "size": stored.size }),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "File uploaded",
        stored,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/upload",
    params(
        ("filename" = String, Query, description = "Stored file name, e.g. `<uuid>.jpg`")
    ),
    responses(
        (status = 200, description = "File removed", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Missing or unsafe filename")
    ),
    security(("bearer_auth" = [])),
    tag = "Upload"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DeleteUploadQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let filename = query
        .filename
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::bad_request("No filename provided"))?;

    let deleted = upload_service::delete_upload(&state.config.upload_dir, &filename).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "upload_delete",
        "uploads",
        serde_json::json!({ "filename": filename, "deleted": deleted }),
    )
    .await;

    Ok(Json(ApiResponse::success(
        "File deleted",
        serde_json::json!({ "success": true, "deleted": deleted }),
        Some(Meta::empty()),
    )))
}
