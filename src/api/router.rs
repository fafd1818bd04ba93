//! API router.
//!
//! Three routes, no auth: liveness at `/`, the two prediction routes
//! underneath. CORS is permissive — browser clients upload directly.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;
use crate::extract::preprocess::MAX_IMAGE_BYTES;

/// Multipart framing allowance on top of the image size cap, so the size
/// validator (not the framework limit) rejects oversized images.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Build the API router.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/", get(endpoints::status::live))
        .route("/predict-prescription", post(endpoints::prescription::predict))
        .route("/predict-box", post(endpoints::box_label::predict))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + BODY_LIMIT_SLACK))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use image::{DynamicImage, Rgb, RgbImage};
    use tower::ServiceExt;

    use crate::extract::spelling::SpellIndex;
    use crate::model::gemini::MockVisionClient;
    use crate::model::types::VisionClient;

    fn test_core(vision: MockVisionClient) -> Arc<CoreState> {
        let vision: Arc<dyn VisionClient> = Arc::new(vision);
        Arc::new(CoreState::new(
            vision,
            "models/gemini-1.5-flash".to_string(),
            SpellIndex::from_lines(["metformin", "ibuprofen", "paracetamol"]),
        ))
    }

    fn tiny_png() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([120, 30, 200])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn multipart_request(uri: &str, field_name: &str, bytes: &[u8]) -> Request<Body> {
        let boundary = "test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; \
                 name=\"{field_name}\"; filename=\"upload.png\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn root_reports_live_status() {
        let app = api_router(test_core(MockVisionClient::new("")));

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json, serde_json::json!({"status": "MedShare API is live"}));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = api_router(test_core(MockVisionClient::new("")));

        let req = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn prescription_without_body_is_no_image_400() {
        let app = api_router(test_core(MockVisionClient::new("")));

        let req = Request::builder()
            .method("POST")
            .uri("/predict-prescription")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json, serde_json::json!({"error": "No image"}));
    }

    #[tokio::test]
    async fn box_without_body_is_no_image_400() {
        let app = api_router(test_core(MockVisionClient::new("")));

        let req = Request::builder()
            .method("POST")
            .uri("/predict-box")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json, serde_json::json!({"error": "No image"}));
    }

    #[tokio::test]
    async fn wrong_field_name_is_no_image_400() {
        let app = api_router(test_core(MockVisionClient::new("")));

        let req = multipart_request("/predict-prescription", "file", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "No image");
    }

    #[tokio::test]
    async fn prescription_returns_parsed_medicines() {
        let reply = "```json\n{\"medicines\": [\
                     {\"name\": \"Paracetamol\", \"strength\": \"500mg\"},\
                     {\"name\": \"Cetirizine\", \"strength\": \"10mg\"}]}\n```";
        let app = api_router(test_core(MockVisionClient::new(reply)));

        let req = multipart_request("/predict-prescription", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["medicines"].as_array().unwrap().len(), 2);
        // Raw model output — no correction, no casing changes
        assert_eq!(json["medicines"][0]["name"], "Paracetamol");
        assert_eq!(json["medicines"][1]["strength"], "10mg");
    }

    #[tokio::test]
    async fn prescription_unparseable_reply_is_empty_list() {
        let app = api_router(test_core(MockVisionClient::new(
            "Sorry, I cannot read this image.",
        )));

        let req = multipart_request("/predict-prescription", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["medicines"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn prescription_model_failure_is_502() {
        let app = api_router(test_core(MockVisionClient::failing()));

        let req = multipart_request("/predict-prescription", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = response_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn prescription_undecodable_image_is_400() {
        let app = api_router(test_core(MockVisionClient::new("")));

        let garbage = vec![0xABu8; 256];
        let req = multipart_request("/predict-prescription", "image", &garbage);
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("decode"));
    }

    #[tokio::test]
    async fn box_returns_normalized_fields_with_duplicate_keys() {
        let reply = "```json\n{\"medicineName\": \"Metfonnin®\", \
                     \"strength\": \" 500mg \", \
                     \"expiryDate\": \"Exp: 12/2025!!\", \
                     \"manufacturingDate\": \"Not Detected\"}\n```";
        let app = api_router(test_core(MockVisionClient::new(reply)));

        let req = multipart_request("/predict-box", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "success");

        // Dictionary correction fixed the OCR-style misspelling
        assert_eq!(json["fields"]["medicineName"], "Metformin");
        assert_eq!(json["fields"]["Medicine_Name"], "Metformin");
        assert_eq!(json["fields"]["strength"], "500mg");
        assert_eq!(json["fields"]["expiryDate"], "12/2025");
        assert_eq!(json["fields"]["EXP_Date"], "12/2025");

        // Sentinel field dropped under both keys
        assert!(json["fields"].get("manufacturingDate").is_none());
        assert!(json["fields"].get("MFG_Date").is_none());

        // fields and detections are always the same map
        assert_eq!(json["fields"], json["detections"]);
    }

    #[tokio::test]
    async fn box_never_emits_empty_valued_keys() {
        let reply = "{\"medicineName\": \"\", \"strength\": \"Not Detected\", \
                     \"expiryDate\": \"\", \"manufacturingDate\": \"\"}";
        let app = api_router(test_core(MockVisionClient::new(reply)));

        let req = multipart_request("/predict-box", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["fields"], serde_json::json!({}));
        assert_eq!(json["detections"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn box_unparseable_reply_is_500() {
        let app = api_router(test_core(MockVisionClient::new("the label is blurry")));

        let req = multipart_request("/predict-box", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Malformed model reply"));
    }

    #[tokio::test]
    async fn box_model_failure_is_502() {
        let app = api_router(test_core(MockVisionClient::failing()));

        let req = multipart_request("/predict-box", "image", &tiny_png());
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
