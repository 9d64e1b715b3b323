use axum::{
    extract::Query,
    http::header,
    response::IntoResponse,
};

use crate::{routes::params::PlaceholderQuery, services::placeholder::render_svg};

pub const CACHE_CONTROL_VALUE: &str = "public, max-age=31536000";

#[utoipa::path(
    get,
    path = "/api/placeholder",
    params(
        ("width" = Option<u32>, Query, description = "Width in pixels, default 400"),
        ("height" = Option<u32>, Query, description = "Height in pixels, default 300"),
        ("text" = Option<String>, Query, description = "Caption, default صورة")
    ),
    responses(
        (status = 200, description = "SVG placeholder image", content_type = "image/svg+xml", body = String)
    ),
    tag = "Placeholder"
)]
pub async fn placeholder(Query(query): Query<PlaceholderQuery>) -> impl IntoResponse {
    let svg = render_svg(query.width, query.height, query.text.as_deref());
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
        ],
        svg,
    )
}
