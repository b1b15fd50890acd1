//! Request-level error taxonomy.
//!
//! Every variant maps to a complete plain-text HTTP response. Upstream
//! 4xx/5xx statuses are not errors: they are proxied like any other response.

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body of the synthesized 404 for unrecognized paths.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Body of every upstream failure response.
pub const FETCH_FAILED_BODY: &str = "Error fetching script";

/// Errors produced while handling a script request.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Inbound path is not in the recognized set.
    #[error("no route for path '{path}'")]
    NotFound { path: String },

    /// Network or protocol error talking to the upstream origin.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    /// Upstream did not send response headers before the deadline.
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),

    /// Base origin and resource name do not form a valid URL.
    #[error("invalid upstream URL for resource '{resource}': {source}")]
    InvalidUpstreamUrl {
        resource: String,
        #[source]
        source: url::ParseError,
    },

    /// The configured upstream base is not a URL.
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RouterError {
    /// HTTP status reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            RouterError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            RouterError::NotFound { .. } => NOT_FOUND_BODY,
            _ => FETCH_FAILED_BODY,
        }
    }
}

impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        match &self {
            RouterError::NotFound { path } => {
                tracing::debug!(path = %path, "No route matched");
            }
            other => {
                tracing::error!(error = %other, "Error fetching script");
            }
        }

        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain")],
            self.body(),
        )
            .into_response()
    }
}

pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = RouterError::NotFound { path: "/nope".into() };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body(), "Not Found");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_failures_map_to_500() {
        let err = RouterError::Timeout(Duration::from_secs(10));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), "Error fetching script");

        let err = RouterError::InvalidUpstreamUrl {
            resource: "x.sh".into(),
            source: url::ParseError::EmptyHost,
        };
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
