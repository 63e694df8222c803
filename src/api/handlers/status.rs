//! Handler for the status endpoint.

use axum::Json;

use crate::api::dto::status::StatusResponse;

/// Describes the service and its endpoints.
///
/// # Endpoint
///
/// `GET /`
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse::online())
}
