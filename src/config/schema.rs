//! Configuration schema definitions.
//!
//! This module defines the route file structure read by the binary.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::Methods;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Routes registered without a prefix, in order.
    pub routes: Vec<RouteConfig>,

    /// Prefixed route groups, registered after `routes`.
    pub groups: Vec<GroupConfig>,

    /// Compiled cache settings.
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/users/{id:i}`.
    pub path: String,

    /// Accepted methods. Omitted or empty means any method.
    #[serde(default)]
    pub methods: Methods,

    /// Opaque identifier handed back on a match.
    pub target: String,
}

/// Routes sharing a path prefix.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GroupConfig {
    /// Prepended verbatim (no separator is inserted).
    pub prefix: String,

    pub routes: Vec<RouteConfig>,

    /// Nested groups, registered after this group's own routes.
    pub groups: Vec<GroupConfig>,
}

/// Compiled cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache file path. When unset, routes are compiled on every start.
    pub path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: RouterConfig = toml::from_str(
            r#"
            [cache]
            path = "routes.cache.json"

            [[routes]]
            path = "/home"
            target = "home"

            [[routes]]
            path = "/login"
            methods = ["GET", "POST"]
            target = "login"

            [[groups]]
            prefix = "/admin"

            [[groups.routes]]
            path = "/users/{id:i}"
            methods = ["GET"]
            target = "admin.user"

            [[groups.groups]]
            prefix = "/reports"
            routes = [{ path = "/{year:i}", target = "admin.report" }]
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.len(), 2);
        assert!(config.routes[0].methods.is_any());
        assert_eq!(config.routes[1].methods, Methods::from(["GET", "POST"]));
        assert_eq!(config.groups[0].groups[0].prefix, "/reports");
        assert_eq!(config.cache.path.as_deref(), Some("routes.cache.json"));
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert!(config.routes.is_empty());
        assert!(config.cache.path.is_none());
    }
}
