//! API route configuration.

use crate::api::handlers::{
    bulk_handler, read_handler, short_handler, status_handler, verify_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All relay endpoints. None of them require authentication.
///
/// # Endpoints
///
/// - `GET  /`        - Service status and usage hints
/// - `GET  /short`   - Shorten one URL (`?url=`)
/// - `POST /bulk`    - Shorten a list of URLs concurrently
/// - `GET  /read`    - Upstream metadata for an alias (`?alias=`)
/// - `GET  /verify`  - Whether a one-time link was opened (`?url=`)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status_handler))
        .route("/short", get(short_handler))
        .route("/bulk", post(bulk_handler))
        .route("/read", get(read_handler))
        .route("/verify", get(verify_handler))
}
