//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route path is absolute and unique
//! - Validate value ranges (timeouts > 0, ttl > 0)
//! - Check the upstream base URL is an http(s) URL that resources can join onto
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::RouterConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "routing.routes[2].path").
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    validate_upstream(config, &mut errors);
    validate_routing(config, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    // The fetch deadline has to expire before the inbound TimeoutLayer does.
    let upstream_secs = config.upstream.timeout_secs;
    let request_secs = config.timeouts.request_secs;
    if upstream_secs > 0 && request_secs > 0 && upstream_secs >= request_secs {
        errors.push(ValidationError::new(
            "upstream.timeout_secs",
            format!("must be less than timeouts.request_secs ({request_secs})"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    let upstream = &config.upstream;

    match Url::parse(&upstream.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::new(
                    "upstream.base_url",
                    format!("unsupported scheme '{}'", url.scheme()),
                ));
            }
            // Url::join replaces the last segment unless the base ends in '/'.
            if !url.path().ends_with('/') {
                errors.push(ValidationError::new("upstream.base_url", "must end with '/'"));
            }
        }
        Err(e) => {
            errors.push(ValidationError::new("upstream.base_url", e.to_string()));
        }
    }

    if upstream.cache_ttl_secs == 0 {
        errors.push(ValidationError::new("upstream.cache_ttl_secs", "must be greater than 0"));
    }
    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be greater than 0"));
    }
    if upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "upstream.connect_timeout_secs",
            "must be greater than 0",
        ));
    }
}

fn validate_routing(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    let routing = &config.routing;

    if let Some(message) = resource_problem(&routing.default_resource) {
        errors.push(ValidationError::new("routing.default_resource", message));
    }

    let mut seen = HashSet::new();
    for (i, route) in routing.routes.iter().enumerate() {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::new(
                format!("routing.routes[{i}].path"),
                format!("'{}' must start with '/'", route.path),
            ));
        }
        if route.path == "/" {
            errors.push(ValidationError::new(
                format!("routing.routes[{i}].path"),
                "the root path is served by default_resource",
            ));
        }
        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::new(
                format!("routing.routes[{i}].path"),
                format!("duplicate path '{}'", route.path),
            ));
        }
        if let Some(message) = resource_problem(&route.resource) {
            errors.push(ValidationError::new(format!("routing.routes[{i}].resource"), message));
        }
    }

    let ua = &routing.user_agent_override;
    if ua.enabled {
        if ua.marker.trim().is_empty() {
            errors.push(ValidationError::new(
                "routing.user_agent_override.marker",
                "must not be empty",
            ));
        }
        if let Some(message) = resource_problem(&ua.resource) {
            errors.push(ValidationError::new("routing.user_agent_override.resource", message));
        }
    }

    let beta = &routing.beta;
    if beta.enabled {
        if beta.param.is_empty() {
            errors.push(ValidationError::new("routing.beta.param", "must not be empty"));
        }
        if beta.marker.is_empty() || beta.marker.contains('/') {
            errors.push(ValidationError::new(
                "routing.beta.marker",
                "must be non-empty and contain no '/'",
            ));
        }
    }
}

/// Resources are plain file names below the upstream base.
fn resource_problem(resource: &str) -> Option<&'static str> {
    if resource.is_empty() {
        Some("must not be empty")
    } else if resource.contains(&['/', '?', '#', ':', '\\'][..]) {
        Some("must be a bare file name")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = RouterConfig::default();
        config.upstream.base_url = "ftp://example.com/scripts".into();
        config.upstream.timeout_secs = 0;
        config.routing.routes.push(RouteConfig::new("hub", "../secret"));
        config.routing.routes.push(RouteConfig::new("/hub", "again.sh"));

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert!(fields.contains(&"upstream.base_url"));
        assert!(fields.contains(&"upstream.timeout_secs"));
        assert!(fields.contains(&"routing.routes[5].path"));
        assert!(fields.contains(&"routing.routes[5].resource"));
        assert!(fields.contains(&"routing.routes[6].path"));
        // scheme + missing trailing slash
        assert_eq!(fields.iter().filter(|f| **f == "upstream.base_url").count(), 2);
    }

    #[test]
    fn test_disabled_override_is_not_checked() {
        let mut config = RouterConfig::default();
        config.routing.user_agent_override.enabled = false;
        config.routing.user_agent_override.marker = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_upstream_timeout_must_fit_request_timeout() {
        let mut config = RouterConfig::default();
        config.upstream.timeout_secs = 5;
        config.timeouts.request_secs = 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "upstream.timeout_secs");
        assert_eq!(errors[0].message, "must be less than timeouts.request_secs (1)");

        config.upstream.timeout_secs = 1;
        assert!(validate_config(&config).is_err());

        config.timeouts.request_secs = 2;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_root_route_rejected() {
        let mut config = RouterConfig::default();
        config.routing.routes.push(RouteConfig::new("/", "other.sh"));
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "routing.routes[5].path");
    }
}
