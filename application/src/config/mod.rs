//! Application-level configuration.
//!
//! - [`RoutingParams`]: router loop control, timeouts and limits

pub mod routing_params;

pub use routing_params::RoutingParams;
