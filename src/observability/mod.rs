//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (request_id, path, resource)
//!     → tower-http TraceLayer spans per request
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every handler event
//! - RUST_LOG overrides the configured filter

pub mod logging;

pub use logging::init_logging;
