//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, User-Agent, query)
//!     → context.rs (derive RoutingContext)
//!     → router.rs (recognized path? evaluate decision table)
//!     → matcher.rs (evaluate rule conditions)
//!     → variant.rs (beta rewrite, always last)
//!     → Return: Selection or NotFound
//!
//! Rule Compilation (at startup):
//!     RoutingConfig
//!     → path rules in configuration order
//!     → root-path User-Agent override
//!     → Freeze as immutable ScriptRouter
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Adding a route is a configuration change, not a code change
//! - Deterministic: same input always selects the same resource
//! - First match wins

pub mod context;
pub mod matcher;
pub mod router;
pub mod variant;

pub use context::RoutingContext;
pub use router::{RouteTable, Rule, ScriptRouter, Selection};
pub use variant::{is_beta_flag, variant_name};
