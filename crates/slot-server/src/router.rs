//! HTTP routes: the config API and the embedded client.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{Method, header};
use rust_embed::Embed;
use slot_core::SlotConfig;
use tower_http::cors::{Any, CorsLayer};

/// Embedded static files from dist/ directory
#[derive(Embed)]
#[folder = "../../dist/"]
struct Assets;

pub fn build_router(config: SlotConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/api/config", get(get_config))
        .layer(cors)
        .fallback(serve_embedded)
        .with_state(Arc::new(config))
}

async fn get_config(State(config): State<Arc<SlotConfig>>) -> Json<SlotConfig> {
    Json(config.as_ref().clone())
}

fn embedded_file(path: &str) -> Option<Response> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.as_ref())], content.data.into_owned()).into_response())
}

/// Serve embedded static files with SPA fallback
async fn serve_embedded(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    embedded_file(path)
        .or_else(|| embedded_file("index.html"))
        .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;

    async fn get_path(router: Router, path: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn test_config_endpoint_returns_active_config() {
        let config = SlotConfig {
            reel_count: 4,
            ..SlotConfig::default()
        };
        let (status, content_type, body) = get_path(build_router(config.clone()), "/api/config").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        let served = SlotConfig::from_json(std::str::from_utf8(&body).unwrap()).unwrap();
        assert_eq!(served, config);
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (status, content_type, _) = get_path(build_router(SlotConfig::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let router = build_router(SlotConfig::default());
        let (_, _, index) = get_path(router.clone(), "/").await;
        let (status, _, body) = get_path(router, "/some/client/route").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, index);
    }
}
