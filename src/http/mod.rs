//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers: request ID, trace, timeout)
//!     → request.rs (request ID generation)
//!     → handler.rs (route, fetch upstream)
//!     → response.rs (rewrite headers, stream body)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{handle, AppState};
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{rewrite_headers, CacheTtl, ScriptResponsePolicy};
pub use server::HttpServer;
