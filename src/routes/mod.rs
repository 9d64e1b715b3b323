use axum::{Router, routing::get};

use crate::state::AppState;

pub mod ads;
pub mod auth;
pub mod categories;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod messages;
pub mod params;
pub mod placeholder;
pub mod reviews;
pub mod upload;
pub mod user;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/ads", ads::router())
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/user", user::router())
        .nest("/reviews", reviews::router())
        .nest("/messages", messages::router())
        .nest("/upload", upload::router())
        .route("/placeholder", get(placeholder::placeholder))
}
