//! Domain layer containing the relay's entities and upstream contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Outcome records and link reports
//! - [`gateways`] - Upstream access trait definitions
//! - [`upstream_reply`] - Interpretation of the upstream's loosely typed JSON
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Gateway traits define contracts implemented by the infrastructure layer
//! - Control flow (retries, fan-out) lives in [`crate::application::services`]

pub mod entities;
pub mod gateways;
pub mod upstream_reply;
