//! Gateway trait definitions for the domain layer.
//!
//! Gateways abstract the third-party services the relay talks to, the same way
//! repositories abstract storage. Implementations live in
//! `crate::infrastructure::upstream`; mock implementations are generated via
//! `mockall` for unit tests.

pub mod shortener_gateway;

pub use shortener_gateway::{CreateLinkRequest, GatewayError, ShortenerGateway};

#[cfg(test)]
pub use shortener_gateway::MockShortenerGateway;
