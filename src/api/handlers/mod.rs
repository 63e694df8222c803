//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod bulk;
pub mod lookup;
pub mod short;
pub mod status;

pub use bulk::bulk_handler;
pub use lookup::{read_handler, verify_handler};
pub use short::short_handler;
pub use status::status_handler;
