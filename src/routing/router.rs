//! Route lookup and resource selection.
//!
//! # Responsibilities
//! - Store the recognized path set
//! - Evaluate the ordered decision table for a request
//! - Apply the beta rewrite to whatever the table selected
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) path recognition via HashSet
//! - O(n) rule scan, first match wins (n is a handful of routes)
//! - Explicit NotFound rather than silent default

use std::collections::HashSet;

use crate::config::RoutingConfig;
use crate::error::{RouterError, RouterResult};
use crate::routing::context::RoutingContext;
use crate::routing::matcher::{AndMatcher, Matcher, PathMatcher, UserAgentMatcher};
use crate::routing::variant::insert_marker;

/// Name reported for selections that fell through to the default resource.
pub const DEFAULT_RULE: &str = "default";

/// The closed set of paths the router answers.
#[derive(Debug, Clone)]
pub struct RouteTable {
    paths: HashSet<String>,
}

impl RouteTable {
    /// The root path is always recognized.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: HashSet<String> = paths.into_iter().map(Into::into).collect();
        set.insert("/".to_string());
        Self { paths: set }
    }

    pub fn recognizes(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Recognized paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.paths.iter().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

/// One row of the decision table.
#[derive(Debug)]
pub struct Rule {
    name: String,
    matcher: Box<dyn Matcher>,
    resource: String,
}

impl Rule {
    pub fn new(name: impl Into<String>, matcher: Box<dyn Matcher>, resource: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher,
            resource: resource.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}

/// The outcome of resource selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Upstream file name, after the beta rewrite.
    pub resource: String,
    /// Name of the rule that matched, or [`DEFAULT_RULE`].
    pub rule: String,
    /// Whether the beta rewrite was applied.
    pub beta: bool,
}

/// Maps requests to upstream resources.
#[derive(Debug)]
pub struct ScriptRouter {
    table: RouteTable,
    rules: Vec<Rule>,
    default_resource: String,
    /// Beta marker; `None` when the beta switch is disabled.
    beta_marker: Option<String>,
    beta_param: String,
}

impl ScriptRouter {
    /// Compile the routing configuration into a decision table.
    ///
    /// Path routes come first in configuration order, then the root-path
    /// User-Agent override.
    pub fn from_config(config: &RoutingConfig) -> Self {
        let mut rules: Vec<Rule> = config
            .routes
            .iter()
            .map(|route| {
                Rule::new(
                    route.path.clone(),
                    Box::new(PathMatcher::new(route.path.clone())),
                    route.resource.clone(),
                )
            })
            .collect();

        let ua = &config.user_agent_override;
        if ua.enabled {
            rules.push(Rule::new(
                format!("user-agent:{}", ua.marker.to_lowercase()),
                Box::new(AndMatcher::new(vec![
                    Box::new(PathMatcher::new("/")),
                    Box::new(UserAgentMatcher::new(ua.marker.clone())),
                ])),
                ua.resource.clone(),
            ));
        }

        let table = RouteTable::new(config.routes.iter().map(|r| r.path.clone()));

        Self {
            table,
            rules,
            default_resource: config.default_resource.clone(),
            beta_marker: config.beta.enabled.then(|| config.beta.marker.clone()),
            beta_param: config.beta.param.clone(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether the beta query parameter is honored.
    pub fn beta_enabled(&self) -> bool {
        self.beta_marker.is_some()
    }

    /// Query parameter carrying the beta flag.
    pub fn beta_param(&self) -> &str {
        &self.beta_param
    }

    /// Validate the path, then select the resource.
    pub fn route(&self, ctx: &RoutingContext) -> RouterResult<Selection> {
        if !self.table.recognizes(ctx.path()) {
            return Err(RouterError::NotFound {
                path: ctx.path().to_string(),
            });
        }
        Ok(self.select(ctx))
    }

    /// Evaluate the decision table. The path is assumed to be recognized.
    pub fn select(&self, ctx: &RoutingContext) -> Selection {
        let (rule, resource) = self
            .rules
            .iter()
            .find(|rule| rule.matcher.matches(ctx))
            .map(|rule| (rule.name.as_str(), rule.resource.as_str()))
            .unwrap_or((DEFAULT_RULE, self.default_resource.as_str()));

        // Evaluated last so it applies whichever rule matched.
        let (resource, beta) = match (&self.beta_marker, ctx.beta()) {
            (Some(marker), true) => (insert_marker(resource, marker), true),
            _ => (resource.to_string(), false),
        };

        Selection {
            resource,
            rule: rule.to_string(),
            beta,
        }
    }
}
