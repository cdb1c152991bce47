//! API router.
//!
//! Routes live under `/api/`. Layers: CORS (browser clients upload scans
//! directly), a raised body limit (scans carry base64 frames), and HTTP
//! tracing.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Scans carry base64 frames; 50 MB covers a 16-frame scan with headroom.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the API router. Mountable on any axum server.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/report", post(endpoints::report::generate))
        .route("/chat", post(endpoints::chat::send))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    Router::new().nest("/api", routes)
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::model::{MockModelClient, ModelError};

    fn router_with_mock(mock: Arc<MockModelClient>) -> Router {
        api_router(ApiContext::with_model(AppConfig::default(), mock))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 10 * 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn scan_request(location_angle: f64) -> serde_json::Value {
        serde_json::json!({
            "mode": "standard",
            "scan": {
                "room_label": "Study",
                "location_angle": location_angle,
                "floor": "1",
                "frames": [
                    { "image_data": "aGVsbG8=", "heading": 10.0 },
                    { "image_data": "d29ybGQ=", "heading": 95.0 }
                ]
            }
        })
    }

    fn numbered_findings() -> String {
        (1..=8)
            .map(|k| format!("{k}. Zone {k} finding."))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── health ──

    #[tokio::test]
    async fn health_reports_model_state() {
        let app = api_router(ApiContext::from_config(AppConfig::default()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["model"], "gemini-2.0-flash");
        assert_eq!(json["model_configured"], false);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = api_router(ApiContext::from_config(AppConfig::default()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── report endpoint ──

    #[tokio::test]
    async fn report_without_credential_is_503() {
        let app = api_router(ApiContext::from_config(AppConfig::default()));
        let response = app
            .oneshot(post_json("/api/report", scan_request(45.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "MODEL_UNCONFIGURED");
    }

    #[tokio::test]
    async fn report_happy_path_returns_stitched_document() {
        let mock = Arc::new(
            MockModelClient::new()
                .then_text(&numbered_findings())
                .then_text("Summary\nEverything holds."),
        );
        let app = router_with_mock(mock.clone());

        let response = app
            .oneshot(post_json("/api/report", scan_request(45.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;

        let report = json["report"].as_str().unwrap();
        assert!(report.contains("[IMAGE_1_ANALYSIS] Zone 1 finding."));
        assert!(report.contains("Everything holds."));
        assert_eq!(json["zone"], "NE");
        assert!(json["cusp"].is_null());
        assert!(!json["request_id"].as_str().unwrap().is_empty());
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn near_boundary_scan_reports_the_cusp_and_briefs_stage2() {
        let mock = Arc::new(
            MockModelClient::new()
                .then_text(&numbered_findings())
                .then_text("doc"),
        );
        let app = router_with_mock(mock.clone());

        // 50° sits within the 10° probe of the NE/ENE boundary at 56.25°
        let response = app
            .oneshot(post_json("/api/report", scan_request(50.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["cusp"]["zone"], "NE");
        assert_eq!(json["cusp"]["alternate"], "ENE");

        // The elaboration prompt names the alternate-zone section
        let stage2 = mock.requests()[1].text_of();
        assert!(stage2.contains("Boundary Ambiguity: NE / ENE"));
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_the_status_code() {
        let mock = Arc::new(MockModelClient::new().then_error(ModelError::Api {
            status: 429,
            body: "quota exhausted".into(),
        }));
        let app = router_with_mock(mock);

        let response = app
            .oneshot(post_json("/api/report", scan_request(45.0)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_FAILED");
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("429"), "{message}");
        assert!(message.contains("quota exhausted"), "{message}");
    }

    #[tokio::test]
    async fn scan_without_frames_still_reaches_the_model() {
        let mock = Arc::new(MockModelClient::replying("ok"));
        let app = router_with_mock(mock.clone());

        let body = serde_json::json!({ "scan": { "room_label": "Bare room" } });
        let response = app.oneshot(post_json("/api/report", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(mock.requests().len(), 2);
        assert!(mock.requests()[0]
            .text_of()
            .contains("No visual data was captured"));
    }

    #[tokio::test]
    async fn malformed_frame_data_is_rejected_before_any_call() {
        let mock = Arc::new(MockModelClient::replying("ok"));
        let app = router_with_mock(mock.clone());

        let body = serde_json::json!({
            "scan": {
                "room_label": "Study",
                "frames": [{ "image_data": "!!not-base64!!", "heading": 0.0 }]
            }
        });
        let response = app.oneshot(post_json("/api/report", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mock.requests().is_empty());
    }

    // ── chat endpoint ──

    #[tokio::test]
    async fn chat_round_trips_a_reply() {
        let mock = Arc::new(MockModelClient::replying(
            "No link is available for that topic.",
        ));
        let app = router_with_mock(mock.clone());

        let body = serde_json::json!({
            "history": [
                { "role": "user", "text": "can you fix my roof? 🛠" }
            ],
            "report_summary": "SE study, minor cracking."
        });
        let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["reply"], "No link is available for that topic.");

        // Pictograph stripped from the user turn before forwarding
        let forwarded = mock.requests()[0].text_of();
        assert!(forwarded.contains("can you fix my roof? "));
        assert!(!forwarded.contains('🛠'));
    }

    #[tokio::test]
    async fn chat_with_empty_history_is_400() {
        let app = router_with_mock(Arc::new(MockModelClient::replying("ok")));
        let body = serde_json::json!({ "history": [] });
        let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_without_credential_is_503() {
        let app = api_router(ApiContext::from_config(AppConfig::default()));
        let body = serde_json::json!({
            "history": [{ "role": "user", "text": "hello" }]
        });
        let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
