//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`upstream`] - reqwest-backed gateway to the ulvis.net API

pub mod upstream;
