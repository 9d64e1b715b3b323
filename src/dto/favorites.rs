use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ToggleFavoriteRequest {
    pub ad_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteState {
    pub ad_id: Uuid,
    pub favorited: bool,
}
