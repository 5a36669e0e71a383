//! Router layers
use tower_http::cors::CorsLayer;

/// Any origin, method and header
pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
