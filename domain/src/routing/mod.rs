//! Routing domain module
//!
//! Value types describing a routed request: the answer [`Mode`], what the
//! router contributed ([`RouterOutcome`]) and the final [`RoutedResponse`].

pub mod mode;
pub mod outcome;
pub mod response;

pub use mode::Mode;
pub use outcome::RouterOutcome;
pub use response::RoutedResponse;
