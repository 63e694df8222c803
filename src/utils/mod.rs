//! Utility functions for alias generation, URL processing, and link parsing.
//!
//! This module provides helper functions used across the application:
//!
//! - [`alias_generator`] - Random alias generation for upstream custom slugs
//! - [`url_normalizer`] - Target URL normalization before dispatch
//! - [`extract_alias`] - Alias extraction from short links

pub mod alias_generator;
pub mod extract_alias;
pub mod url_normalizer;
