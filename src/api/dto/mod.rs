//! Data Transfer Objects for API requests and responses.
//!
//! Query DTOs use Serde for deserialization and validator for input
//! validation. Shortening results are serialized straight from the domain
//! entities.

pub mod lookup;
pub mod shorten;
pub mod status;
