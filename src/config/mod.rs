//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, patterns compiled once)
//!     → RouterConfig (validated, immutable)
//!     → RouteTable::from_config
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new file
//!     → validation.rs validates
//!     → table compiled, frozen, cache file rewritten
//!     → atomic swap of Arc<Matcher>
//! ```
//!
//! # Design Decisions
//! - A bad reload keeps the previous matcher in service
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::CacheConfig;
pub use schema::GroupConfig;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
