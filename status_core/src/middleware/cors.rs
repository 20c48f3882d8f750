//! CORS configuration

use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Any origin, method and header. The dashboard and its JSON API are public.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(Duration::from_secs(3600))
}
