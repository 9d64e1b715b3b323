use axum::{body::to_bytes, extract::Query, http::header, response::IntoResponse};
use classifieds_api::routes::{params::PlaceholderQuery, placeholder::placeholder};

#[tokio::test]
async fn placeholder_is_cacheable_svg() {
    let response = placeholder(Query(PlaceholderQuery {
        width: Some(640),
        height: None,
        text: Some("Villa & Garden".into()),
    }))
    .await
    .into_response();

    assert_eq!(response.status(), 200);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=31536000");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let svg = String::from_utf8(body.to_vec()).unwrap();
    assert!(svg.contains(r#"width="640" height="300""#));
    assert!(svg.contains("Villa &amp; Garden"));
}

#[tokio::test]
async fn placeholder_defaults_to_arabic_caption() {
    let response = placeholder(Query(PlaceholderQuery::default()))
        .await
        .into_response();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let svg = String::from_utf8(body.to_vec()).unwrap();
    assert!(svg.contains(r#"width="400" height="300""#));
    assert!(svg.contains("صورة"));
}
