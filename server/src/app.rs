use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

/// How long a static response may be cached by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CachePolicy {
    /// Content-hashed bundles never change under the same name.
    Immutable,
    /// Entry documents must be revalidated so new bundle hashes are picked up.
    Revalidate,
    /// Leave whatever `ServeDir` sets.
    Default,
}

impl CachePolicy {
    fn for_path(path: &str) -> Self {
        if path == "/" || path.ends_with(".html") {
            return Self::Revalidate;
        }
        if is_hashed_bundle_asset(path) {
            return Self::Immutable;
        }
        Self::Default
    }

    fn header_value(self) -> Option<&'static str> {
        match self {
            Self::Immutable => Some("public, max-age=31536000, immutable"),
            Self::Revalidate => Some("no-cache"),
            Self::Default => None,
        }
    }
}

pub(crate) fn build_app(state: AppState) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(state.static_dir.as_ref())
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let app = Router::new()
        .route("/api/config", axum::routing::get(routes::api::get_config))
        .route("/api/health", axum::routing::get(routes::api::health));

    app.layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let policy = CachePolicy::for_path(request.uri().path());
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = policy.header_value()
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

/// Trunk names bundles like `income-map-client-1f2e3d4c5b6a7980_bg.wasm`.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let path = Path::new(path);
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return false;
    };

    stem.split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}
