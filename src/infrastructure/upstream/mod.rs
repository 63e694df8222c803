//! HTTP clients for the upstream shortening service.

mod ulvis_gateway;

pub use ulvis_gateway::{GatewayBuildError, UlvisGateway};
