//! Handlers for reading back existing links.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::Value;

use crate::api::dto::lookup::{ReadQuery, VerifyQuery};
use crate::domain::entities::LinkReport;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the upstream's metadata for an alias as-is.
///
/// # Endpoint
///
/// `GET /read?alias=<alias>`
///
/// # Errors
///
/// - **400**: alias missing or malformed
/// - **502**: upstream reply not JSON, or transport failure
/// - **504**: upstream timed out
pub async fn read_handler(
    State(state): State<AppState>,
    Query(query): Query<ReadQuery>,
) -> Result<Json<Value>, AppError> {
    let alias = query.into_alias()?;

    let value = state.lookup_service.read(&alias).await?;

    Ok(Json(value))
}

/// Reports whether a one-time link has been opened.
///
/// # Endpoint
///
/// `GET /verify?url=<short link or alias>`
///
/// # Response
///
/// ```json
/// {
///   "alias": "AbCd",
///   "link_status": "USED",
///   "verdict": "The link has been opened.",
///   "evidence": { "hits": 1, "last_activity_ist": "26 Nov 2025, 7:33:45 PM" }
/// }
/// ```
///
/// # Errors
///
/// - **400**: `url` missing or no alias in it
/// - **404**: upstream does not know the alias
/// - **502** / **504**: upstream failures, as for [`read_handler`]
pub async fn verify_handler(
    State(state): State<AppState>,
    Query(query): Query<VerifyQuery>,
) -> Result<Json<LinkReport>, AppError> {
    let link = query.into_link()?;

    let report = state.lookup_service.verify(&link).await?;

    Ok(Json(report))
}
