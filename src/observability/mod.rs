//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / cache / config produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt subscriber installed by the binary)
//!     → whatever metrics recorder the host application installs
//! ```

pub mod logging;
pub mod metrics;
