pub mod ads;
pub mod auth;
pub mod favorites;
pub mod messages;
pub mod reviews;
pub mod upload;
