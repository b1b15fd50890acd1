//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.
//! The defaults describe the production routing table, so an empty file
//! (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};

/// Upstream origin hosting the install scripts.
pub const DEFAULT_UPSTREAM_BASE: &str =
    "https://raw.githubusercontent.com/henrygd/beszel/main/supplemental/scripts/";

/// Generic Linux/shell install script served when nothing more specific matches.
pub const DEFAULT_RESOURCE: &str = "install-agent.sh";

/// Freshness window applied to fetches and responses.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;

/// Root configuration for the install router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream origin and fetch settings.
    pub upstream: UpstreamConfig,

    /// Recognized paths and the resource each one serves.
    pub routing: RoutingConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL that resource names are joined onto. Must end with `/`.
    pub base_url: String,

    /// Freshness window in seconds, sent upstream and set on responses.
    pub cache_ttl_secs: u64,

    /// Deadline for receiving upstream response headers, in seconds.
    pub timeout_secs: u64,

    /// TCP connect timeout, in seconds.
    pub connect_timeout_secs: u64,

    /// User-Agent sent on outbound fetches.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: concat!("install-router/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Routing table configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Resource served on the root path when no override applies.
    pub default_resource: String,

    /// Named sub-paths, checked in order.
    pub routes: Vec<RouteConfig>,

    /// Root-path override keyed on the User-Agent header.
    pub user_agent_override: UserAgentOverride,

    /// Beta variant switch.
    pub beta: BetaConfig,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_resource: DEFAULT_RESOURCE.to_string(),
            routes: vec![
                RouteConfig::new("/hub", "install-hub.sh"),
                RouteConfig::new("/brew", "install-agent-brew.sh"),
                RouteConfig::new("/windows", "install-agent.ps1"),
                RouteConfig::new("/upgrade", "upgrade-agent.ps1"),
                RouteConfig::new("/upgrade-wrapper", "upgrade-wrapper.ps1"),
            ],
            user_agent_override: UserAgentOverride::default(),
            beta: BetaConfig::default(),
        }
    }
}

/// A recognized path and the resource it serves.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Exact request path (e.g. "/hub").
    pub path: String,

    /// Upstream file name.
    pub resource: String,
}

impl RouteConfig {
    pub fn new(path: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            resource: resource.into(),
        }
    }
}

/// Serve a different resource on the root path when the User-Agent
/// contains `marker` (compared case-insensitively).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserAgentOverride {
    pub enabled: bool,
    pub marker: String,
    pub resource: String,
}

impl Default for UserAgentOverride {
    fn default() -> Self {
        Self {
            enabled: true,
            marker: "powershell".to_string(),
            resource: "install-agent.ps1".to_string(),
        }
    }
}

/// Beta variant configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BetaConfig {
    /// Honor the beta query parameter.
    pub enabled: bool,

    /// Query parameter name.
    pub param: String,

    /// Marker inserted before the resource's file extension.
    pub marker: String,
}

impl Default for BetaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            param: "beta".to_string(),
            marker: "-beta".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (time to produce response headers) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when RUST_LOG is unset (e.g. "info").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "install_router=info,tower_http=info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
