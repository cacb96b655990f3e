//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     route()/group()
//!     → group.rs (prefix stack applied to the path)
//!     → table.rs (append Route, invalidate compiled cache)
//!
//! Route Compilation (lazy, once per table revision):
//!     Route[]
//!     → compiler.rs (Literal, or anchored regex + capture names)
//!     → CompiledRoute[] cached on the table
//!
//! Incoming (path, method)
//!     → matcher.rs (linear scan, first match wins)
//!     → Return: Found / NotAllowed / NotFound
//! ```
//!
//! # Design Decisions
//! - Registration order is the only tie-break
//! - Unknown assertions fail at compile time, never at match time
//! - A compiled table can be frozen into an immutable `Matcher`

pub mod compiler;
pub mod error;
mod group;
pub mod matcher;
pub mod methods;
pub mod result;
pub mod route;
pub mod table;

pub use compiler::{compile_path, Assertion, Captures, CompiledPath, CompiledPattern};
pub use error::RouteError;
pub use matcher::Matcher;
pub use methods::Methods;
pub use result::MatchResult;
pub use route::{CompiledRoute, Route};
pub use table::RouteTable;
