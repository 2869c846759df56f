pub mod config;

pub use config::{ConfigError, ServerConfig};

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Static site: `/` serves `index.html`, everything else comes from the
/// public directory.
pub fn router(public_dir: &Path) -> Router {
    let index = ServeFile::new(public_dir.join("index.html"));
    Router::new()
        .route_service("/", index)
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
