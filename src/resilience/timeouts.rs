//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap upstream calls with a deadline
//! - Cancel the wrapped future cleanly on expiry
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from transport errors (`RouterError::Timeout`)
//! - The deadline covers response headers only; body streaming is unbounded

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{RouterError, RouterResult};

/// Run `fut` with a deadline. On expiry the future is dropped, which
/// aborts any in-flight I/O it owns.
pub async fn with_deadline<F, T>(deadline: Duration, fut: F) -> RouterResult<T>
where
    F: Future<Output = T>,
{
    timeout(deadline, fut)
        .await
        .map_err(|_| RouterError::Timeout(deadline))
}
