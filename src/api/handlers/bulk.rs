//! Handler for concurrent bulk shortening.

use axum::{Json, body::Bytes, extract::State};

use crate::api::dto::shorten::BulkRequest;
use crate::domain::entities::BatchResult;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a list of URLs concurrently.
///
/// # Endpoint
///
/// `POST /bulk`
///
/// # Batch Processing
///
/// All URLs are processed at the same time. If one fails, the others are
/// unaffected; each result carries either link data or an error. Results are
/// returned in request order. An empty list returns an empty result.
///
/// # Request Body
///
/// ```json
/// { "urls": ["example.com", "https://rust-lang.org"] }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "total_processed": 2,
///   "results": [
///     { "success": true, "original_url": "https://example.com", "short_url": "https://ulvis.net/AbCd", "alias": "AbCd" },
///     { "success": false, "original_url": "https://rust-lang.org", "error": "upstream request timed out" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or `urls` is missing or
/// not a list of strings.
pub async fn bulk_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchResult>, AppError> {
    let request = BulkRequest::from_slice(&body)?;

    let batch = state.link_service.create_links_batch(request.urls).await;

    Ok(Json(batch))
}
