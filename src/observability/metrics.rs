//! Metrics collection.
//!
//! # Metrics
//! - `route_match_total` (counter): match outcomes by `result`
//!   (`found`, `not_allowed`, `not_found`)
//! - `route_compile_total` (counter): full table compilations
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until the host installs
//!   a recorder
//! - Compile count doubles as a cache-effectiveness signal

/// Count one match outcome.
pub fn record_match(result: &'static str) {
    ::metrics::counter!("route_match_total", "result" => result).increment(1);
}

/// Count one route table compilation.
pub fn record_compile() {
    ::metrics::counter!("route_compile_total").increment(1);
}
