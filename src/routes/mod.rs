//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - JSON API under `/api/v1/...`
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/questions", get(http::http_get_questions))
        .route("/api/v1/questions/match", post(http::http_post_match))
        .route("/api/v1/questions/find", post(http::http_post_find))
        .route(
            "/api/v1/translation",
            get(http::http_get_translation).post(http::http_post_translation),
        )
        .route("/api/v1/key_terms/rule", get(http::http_get_rule))
        .route(
            "/api/v1/key_terms/rendering",
            get(http::http_get_rendering).post(http::http_post_rendering),
        )
        .route("/api/v1/key_terms/occurrences", get(http::http_get_occurrences))
        .route("/api/v1/key_terms/suggestable", get(http::http_get_suggestable))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn app() -> Router {
        build_router(Arc::new(AppState::default()))
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = call(app(), Request::get("/api/v1/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn match_endpoint_ignores_label() {
        let req = post_json(
            "/api/v1/questions/match",
            json!({
                "a": {"scripture_reference": "MAT 5.3", "start_ref": 40005003, "end_ref": 40005003, "text": "Who?"},
                "b": {"scripture_reference": "Mt 5:3", "start_ref": 40005003, "end_ref": 40005003, "text": "Who?"}
            }),
        );
        let (status, body) = call(app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matches"], true);
    }

    #[tokio::test]
    async fn rule_endpoint_normalizes_term() {
        let req = Request::get("/api/v1/key_terms/rule?term=MOSHE").body(Body::empty()).unwrap();
        let (_, body) = call(app(), req).await;
        assert_eq!(body["normalized"], "moshe");
        assert_eq!(body["reference_only"], true);
        assert_eq!(body["excluded"], false);
    }

    #[tokio::test]
    async fn translation_roundtrip_through_shared_state() {
        let app = app();
        let req = post_json(
            "/api/v1/translation",
            json!({"reference": "MAT 17.3", "text": "Who appeared and talked with Jesus?", "translation": "¿Quiénes aparecieron?"}),
        );
        let (_, body) = call(app.clone(), req).await;
        assert_eq!(body["translation"], "¿Quiénes aparecieron?");

        let req = post_json("/api/v1/questions/find", json!({"reference": "MAT 17.3", "text": "Who appeared and talked with Jesus?"}));
        let (_, body) = call(app, req).await;
        assert_eq!(body["question"]["translation"], "¿Quiénes aparecieron?");
        assert_eq!(body["question"]["start_ref"], 40017003);
    }

    #[tokio::test]
    async fn occurrences_endpoint() {
        let req = Request::get("/api/v1/key_terms/occurrences?term=elijah&start=40017001&end=40017013")
            .body(Body::empty())
            .unwrap();
        let (_, body) = call(app(), req).await;
        assert_eq!(body["occurrences"], json!([40017003, 40017010]));
        assert_eq!(body["references"], json!(["MAT 17.3", "MAT 17.10"]));
    }
}
