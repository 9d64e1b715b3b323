use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::sea_orm_active_enums::MediaType;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    /// Public path, e.g. `/uploads/<uuid>.jpg`.
    pub url: String,
    pub filename: String,
    pub size: u64,
    pub content_type: String,
    pub media_type: MediaType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteUploadQuery {
    pub filename: Option<String>,
}
