//! DTO for the status endpoint.

use serde::Serialize;

/// Service descriptor returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub usage: &'static str,
    pub bulk: &'static str,
    pub read: &'static str,
    pub verify: &'static str,
}

impl StatusResponse {
    pub fn online() -> Self {
        Self {
            status: "Online",
            version: env!("CARGO_PKG_VERSION"),
            usage: "/short?url=https://example.com",
            bulk: "POST /bulk with json {\"urls\": [\"...\"]}",
            read: "/read?alias=AbCd",
            verify: "/verify?url=https://ulvis.net/AbCd",
        }
    }
}
