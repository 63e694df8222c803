//! Cross-origin resource sharing.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Allows any origin to call the relay from a browser.
///
/// Only the methods the API serves are advertised; preflight `OPTIONS`
/// requests are answered by the layer itself.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
