pub mod ad_query;
pub mod ad_service;
pub mod auth_service;
pub mod category_service;
pub mod favorite_service;
pub mod message_service;
pub mod placeholder;
pub mod review_service;
pub mod upload_service;
