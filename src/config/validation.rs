//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every route pattern so bad assertions fail at load time
//! - Reject empty targets and blank method names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Paths are checked with group prefixes applied, as they will be registered

use thiserror::Error;

use crate::config::schema::{GroupConfig, RouteConfig, RouterConfig};
use crate::routing::{compile_path, RouteError};

/// A single semantic problem in a route file.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("route '{path}' has an empty target")]
    EmptyTarget { path: String },

    #[error("route '{path}' lists a blank method name")]
    BlankMethod { path: String },

    #[error(transparent)]
    Pattern(#[from] RouteError),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut prefix = String::new();

    for route in &config.routes {
        validate_route(&prefix, route, &mut errors);
    }
    for group in &config.groups {
        validate_group(&mut prefix, group, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_group(prefix: &mut String, group: &GroupConfig, errors: &mut Vec<ValidationError>) {
    let len = prefix.len();
    prefix.push_str(&group.prefix);

    for route in &group.routes {
        validate_route(prefix, route, errors);
    }
    for nested in &group.groups {
        validate_group(prefix, nested, errors);
    }

    prefix.truncate(len);
}

fn validate_route(prefix: &str, route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    let path = format!("{prefix}{}", route.path);

    if route.target.trim().is_empty() {
        errors.push(ValidationError::EmptyTarget { path: path.clone() });
    }
    if route.methods.iter().any(|m| m.trim().is_empty()) {
        errors.push(ValidationError::BlankMethod { path: path.clone() });
    }
    if let Err(e) = compile_path(&path) {
        errors.push(e.into());
    }
}
