//! Core domain entities representing the relay's data model.
//!
//! Entities are plain data structures; the rules that produce them live in
//! [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`ShortenOutcome`] - Normalized result of shortening one URL
//! - [`BatchResult`] - Ordered outcomes of a bulk request
//! - [`LinkFailure`] - Classification of a terminal shortening failure
//! - [`LinkReport`] - Usage report for an existing short link

pub mod link_report;
pub mod outcome;

pub use link_report::{Evidence, LinkReport, LinkStatus};
pub use outcome::{BatchResult, CreatedLink, LinkFailure, ShortenOutcome};
