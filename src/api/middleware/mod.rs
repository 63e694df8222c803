//! HTTP middleware for request processing.
//!
//! Provides cross-origin access and request observability.

pub mod cors;
pub mod tracing;
