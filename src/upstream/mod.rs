//! Upstream origin access.
//!
//! # Data Flow
//! ```text
//! Selection (resource name)
//!     → client.rs (join onto base origin, attach freshness hint)
//!     → one GET, bounded by resilience::timeouts
//!     → reqwest::Response (headers read, body not yet polled)
//! ```
//!
//! # Design Decisions
//! - One shared, pooled HTTP client per process
//! - The inbound query string is never forwarded; the resource name is the cache key
//! - Upstream 4xx/5xx are returned as responses, not errors

pub mod client;

pub use client::{FreshnessHint, ScriptFetcher, UpstreamRequest};
