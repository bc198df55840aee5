mod config;
mod page;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::HostConfig;

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(config: Arc<HostConfig>) -> Router {
    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.static_dir, CACHE_1DAY),
        )
        .nest(
            "/dist",
            cached_static_router(&config.dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/", get(serve_index))
        .route("/dashboard", get(serve_index))
        .with_state(config)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HostConfig::from_env().context("reading host configuration")?;
    if config.kakao_map_api_key.is_none() {
        tracing::warn!("KAKAO_MAP_API_KEY is not set, the map will not load");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(port = config.port, dist = %config.dist_dir.display(), "serving cafe diary");

    axum::serve(listener, build_app(Arc::new(config)))
        .await
        .context("server error")?;
    Ok(())
}

async fn serve_index(State(config): State<Arc<HostConfig>>) -> Html<String> {
    // Serve the built frontend with the map SDK wired in, or a placeholder
    let index = config.dist_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => match &config.kakao_map_api_key {
            Some(key) => Html(page::inject_map_sdk(&html, key)),
            None => Html(html),
        },
        Err(e) => {
            tracing::debug!(path = %index.display(), error = %e, "index.html unavailable");
            Html(page::FALLBACK_PAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::path::PathBuf;
    use tower::ServiceExt;

    /// Create a temp dir with a test file and return the dir path.
    fn temp_dir_with_file(file_name: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        dir
    }

    fn test_config(dist_dir: &Path, static_dir: &Path, key: Option<&str>) -> Arc<HostConfig> {
        Arc::new(HostConfig {
            port: 0,
            kakao_map_api_key: key.map(str::to_string),
            dist_dir: dist_dir.to_path_buf(),
            static_dir: static_dir.to_path_buf(),
        })
    }

    async fn get_response(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const INDEX: &str = "<html><head><title>Cafe Diary</title></head><body></body></html>";

    #[tokio::test]
    async fn test_index_gets_map_sdk() {
        let dist_dir = temp_dir_with_file("index.html", INDEX);
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), Some("abc123")));

        let resp = get_response(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("appkey=abc123"));
        assert!(body.find("dapi.kakao.com").unwrap() < body.find("</head>").unwrap());
    }

    #[tokio::test]
    async fn test_dashboard_serves_same_page() {
        let dist_dir = temp_dir_with_file("index.html", INDEX);
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), Some("k")));

        let root = body_text(get_response(app.clone(), "/").await).await;
        let dashboard = body_text(get_response(app, "/dashboard").await).await;
        assert_eq!(root, dashboard);
    }

    #[tokio::test]
    async fn test_index_without_key_is_untouched() {
        let dist_dir = temp_dir_with_file("index.html", INDEX);
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), None));

        let body = body_text(get_response(app, "/").await).await;
        assert_eq!(body, INDEX);
    }

    #[tokio::test]
    async fn test_missing_bundle_serves_fallback() {
        let app = build_app(test_config(
            &PathBuf::from("/nonexistent/dist"),
            &PathBuf::from("/nonexistent/static"),
            Some("k"),
        ));

        let resp = get_response(app, "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_static_assets_have_1day_cache() {
        let dist_dir = temp_dir_with_file("index.html", INDEX);
        let static_dir = temp_dir_with_file("cafe.png", "png");
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), None));

        let resp = get_response(app, "/static/cafe.png").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_bundles_have_immutable_cache() {
        let dist_dir = temp_dir_with_file("cafe-diary-frontend-abc123.js", "bundle()");
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), None));

        let resp = get_response(app, "/dist/cafe-diary-frontend-abc123.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let dist_dir = temp_dir_with_file("assets/main-xyz.css", "body{}");
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), None));

        let resp = get_response(app, "/assets/main-xyz.css").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let dist_dir = temp_dir_with_file("index.html", INDEX);
        let static_dir = temp_dir_with_file("cafe.png", "png");
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), None));

        let resp = get_response(app, "/static/nonexistent.txt").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_endpoint_is_not_served_here() {
        let dist_dir = temp_dir_with_file("index.html", INDEX);
        let static_dir = tempfile::tempdir().unwrap();
        let app = build_app(test_config(dist_dir.path(), static_dir.path(), None));

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload_receipt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
