//! # Link Relay
//!
//! An HTTP relay that shortens URLs through the ulvis.net API.
//!
//! The upstream makes a caller pick the alias. The relay generates a random
//! alias per attempt and retries with a fresh one when the upstream reports
//! it as taken, so clients only send the target URL.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Outcomes, reports and the upstream gateway trait
//! - **Application Layer** ([`application`]) - Alias protocol and lookups
//! - **Infrastructure Layer** ([`infrastructure`]) - The reqwest-based upstream client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Single and bulk shortening; bulk runs every URL concurrently
//! - Scheme-less input (`example.com`) is accepted
//! - Alias-collision retries with a configurable bound
//! - Read-back of alias metadata and one-time link verification
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl 'http://localhost:8000/short?url=example.com'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkPolicy, LinkService, LookupService};
    pub use crate::domain::entities::{BatchResult, LinkReport, ShortenOutcome};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
