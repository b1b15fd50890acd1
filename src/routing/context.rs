//! Per-request routing inputs.

use axum::http::{header, request::Parts};

use crate::routing::variant::is_beta_flag;

/// Everything resource selection looks at, derived once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingContext {
    path: String,
    user_agent: Option<String>,
    beta: bool,
}

impl RoutingContext {
    /// Build a context directly. The User-Agent is lowercased here.
    pub fn new(path: impl Into<String>, user_agent: Option<&str>, beta: bool) -> Self {
        Self {
            path: path.into(),
            user_agent: user_agent.map(str::to_lowercase),
            beta,
        }
    }

    /// Derive the context from request parts.
    ///
    /// `beta_param` names the query parameter carrying the beta flag; only its
    /// first occurrence counts. Non-ASCII bytes in the User-Agent are decoded
    /// lossily, so the rest of the header is still searched.
    pub fn from_parts(parts: &Parts, beta_param: &str) -> Self {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()));

        let beta = parts
            .uri
            .query()
            .and_then(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .find(|(key, _)| key == beta_param)
                    .map(|(_, value)| is_beta_flag(&value))
            })
            .unwrap_or(false);

        Self::new(parts.uri.path(), user_agent.as_deref(), beta)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lowercased User-Agent, if the request had one.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn beta(&self) -> bool {
        self.beta
    }
}
