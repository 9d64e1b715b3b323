use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` body extractor whose rejections use the `AppError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::IntoResponse,
    };

    use crate::dto::ads::CreateAdRequest;

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/ads")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_and_mistyped_bodies_are_bad_requests() {
        for body in ["{\"title\": ", r#"{"price": true}"#] {
            let err = ApiJson::<CreateAdRequest>::from_request(json_request(body), &())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{body}");
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_a_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/ads")
            .body(Body::from("{}"))
            .unwrap();
        let err = ApiJson::<CreateAdRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let ApiJson(req) =
            ApiJson::<CreateAdRequest>::from_request(json_request(r#"{"title": "Villa"}"#), &())
                .await
                .unwrap();
        assert_eq!(req.title.as_deref(), Some("Villa"));
    }
}
