//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce deadline on the fetch)
//!     → On failure: surface RouterError, mapped to the generic 500
//! ```
//!
//! # Design Decisions
//! - Every outbound call has a deadline
//! - A single attempt per request; there is no retry or circuit breaker

pub mod timeouts;

pub use timeouts::with_deadline;
