use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

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

/// Build the full application router over a built frontend bundle.
///
/// Hashed bundle assets get the immutable policy; the entry points (index
/// and anything else at the bundle root) revalidate daily.
fn build_app(dist_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        )
        .fallback_service(cached_static_router(dist_dir, CACHE_1DAY));

    Router::new()
        .route("/", get(serve_index))
        .with_state(dist_dir.to_path_buf())
        .merge(static_files)
        .layer(CompressionLayer::new())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let dist_dir = PathBuf::from(std::env::var("DIST_DIR").unwrap_or_else(|_| "dist".to_string()));
    let app = build_app(&dist_dir);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(%addr, dist = %dist_dir.display(), "Serving OutdoorGears");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn serve_index(State(dist_dir): State<PathBuf>) -> Html<String> {
    // Serve the built frontend, fall back to a simple message
    match std::fs::read_to_string(dist_dir.join("index.html")) {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>OutdoorGears</title></head>
<body>
<h1>OutdoorGears</h1>
<p>Frontend not built yet. Run <code>dx build</code> in crates/frontend first.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}
