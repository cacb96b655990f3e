//! Path-pattern route compiler and request matcher.
//!
//! Routes are registered in order with a path pattern (`/users/{id:i}`),
//! optional HTTP methods and an opaque target. Matching a `(path, method)`
//! pair yields the first accepting route's target and captures, the set of
//! methods that would have been accepted, or nothing.

pub mod cache;
pub mod config;
pub mod observability;
pub mod routing;

pub use cache::create_matcher;
pub use config::RouterConfig;
pub use routing::{MatchResult, Matcher, Methods, RouteError, RouteTable};
