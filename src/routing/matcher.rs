//! Rule matching logic.
//!
//! # Responsibilities
//! - Match the request path (exact, case-sensitive)
//! - Match a marker inside the User-Agent header (case-insensitive)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - User-Agent matching is case-insensitive; the context stores it lowercased
//! - Path matching is exact and case-sensitive
//! - No regex to guarantee O(n) matching

use crate::routing::context::RoutingContext;

/// Trait for matching a routing context against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the context matches this condition.
    fn matches(&self, ctx: &RoutingContext) -> bool;
}

/// Matches one exact request path.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    path: String,
}

impl PathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for PathMatcher {
    fn matches(&self, ctx: &RoutingContext) -> bool {
        ctx.path() == self.path
    }
}

/// Matches when the User-Agent contains a marker substring.
#[derive(Debug, Clone)]
pub struct UserAgentMatcher {
    marker: String,
}

impl UserAgentMatcher {
    /// The marker is normalized to lowercase for case-insensitive matching.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
        }
    }
}

impl Matcher for UserAgentMatcher {
    fn matches(&self, ctx: &RoutingContext) -> bool {
        ctx.user_agent()
            .map(|ua| ua.contains(&self.marker))
            .unwrap_or(false)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, ctx: &RoutingContext) -> bool {
        self.matchers.iter().all(|m| m.matches(ctx))
    }
}
