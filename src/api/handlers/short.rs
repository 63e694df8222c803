//! Handler for single URL shortening.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::api::dto::shorten::ShortQuery;
use crate::domain::entities::ShortenOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens one URL through the upstream.
///
/// # Endpoint
///
/// `GET /short?url=<target>`
///
/// A target without an `http://`/`https://` scheme gets `https://` prepended.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "original_url": "https://example.com",
///   "short_url": "https://ulvis.net/AbCd",
///   "alias": "AbCd"
/// }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: Link created
/// - **400 Bad Request**: `url` missing or blank (error body), or the link
///   could not be created (outcome body with `success: false` and `error`)
pub async fn short_handler(
    State(state): State<AppState>,
    Query(query): Query<ShortQuery>,
) -> Result<(StatusCode, Json<ShortenOutcome>), AppError> {
    let url = query.into_url()?;

    let outcome = state.link_service.shorten(&url).await;

    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(outcome)))
}
