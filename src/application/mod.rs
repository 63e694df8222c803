//! Application layer services implementing the relay's control flow.
//!
//! Services consume the gateway trait and provide a clean API for HTTP
//! handlers and the command-line client.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Alias-retry protocol and concurrent batches
//! - [`services::lookup_service::LookupService`] - Link metadata and usage reports

pub mod services;
