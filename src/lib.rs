//! Install script router library.
//!
//! Serves install scripts by proxying them from a fixed upstream origin.
//! The script is picked from the request path, the client's User-Agent on
//! the root path, and an optional beta query switch.

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod routing;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::schema::RouterConfig;
pub use error::RouterError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
