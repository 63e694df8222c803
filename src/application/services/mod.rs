//! Business logic services for the application layer.

pub mod link_service;
pub mod lookup_service;

pub use link_service::{LinkPolicy, LinkService};
pub use lookup_service::LookupService;
