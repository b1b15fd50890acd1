//! Response transformation.
//!
//! # Responsibilities
//! - Turn the upstream response into the client response
//! - Drop `Content-Disposition` so scripts display and pipe as text
//! - Drop hop-by-hop headers of the upstream connection
//! - Force `Content-Type` and `Cache-Control`
//! - Stream the body through without buffering
//!
//! # Design Decisions
//! - Upstream status and reason phrase are preserved, 4xx/5xx included
//! - Every end-to-end upstream header is copied as-is, repeated values included
//! - The freshness window is also attached as a [`CacheTtl`] extension for
//!   any caching layer placed in front of the router

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;

/// Content type of every proxied script.
pub const SCRIPT_CONTENT_TYPE: HeaderValue = HeaderValue::from_static("text/plain");

/// Headers that describe the upstream connection rather than the script.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Response-level freshness hint, carried in the response extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl(pub Duration);

/// Fixed header policy applied to every proxied script.
#[derive(Debug, Clone)]
pub struct ScriptResponsePolicy {
    ttl: Duration,
    cache_control: HeaderValue,
}

impl ScriptResponsePolicy {
    pub fn new(ttl: Duration) -> Self {
        let cache_control = HeaderValue::from_str(&format!("public, max-age={}", ttl.as_secs()))
            .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=600"));
        Self { ttl, cache_control }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Value written to `Cache-Control`.
    pub fn cache_control(&self) -> &HeaderValue {
        &self.cache_control
    }
}

/// Build the client header set from the upstream headers.
pub fn rewrite_headers(upstream: &HeaderMap, cache_control: &HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 2);

    for (name, value) in upstream {
        if *name == header::CONTENT_DISPOSITION || HOP_BY_HOP.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    headers.insert(header::CACHE_CONTROL, cache_control.clone());
    headers.insert(header::CONTENT_TYPE, SCRIPT_CONTENT_TYPE);
    headers
}

/// Assemble the client response around an upstream response whose body
/// has not been read yet.
pub fn into_script_response(upstream: reqwest::Response, policy: &ScriptResponsePolicy) -> Response {
    let status = upstream.status();
    let reason = upstream.extensions().get::<hyper::ext::ReasonPhrase>().cloned();
    let headers = rewrite_headers(upstream.headers(), policy.cache_control());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;

    // Only present when the upstream used a non-canonical phrase.
    if let Some(reason) = reason {
        response.extensions_mut().insert(reason);
    }
    response.extensions_mut().insert(CacheTtl(policy.ttl()));

    response
}
