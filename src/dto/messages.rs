use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Message;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub recipient_id: Option<Uuid>,
    pub ad_id: Option<Uuid>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageList {
    pub items: Vec<Message>,
}
