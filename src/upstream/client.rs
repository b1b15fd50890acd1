//! HTTP client for the script origin.

use std::time::{Duration, Instant};

use reqwest::header::CACHE_CONTROL;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{RouterError, RouterResult};
use crate::resilience::with_deadline;

/// Caching directives attached to an outbound fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessHint {
    /// How long the fetched script may be reused.
    pub ttl: Duration,
    /// Identity of the cached entry. Equal to the resource name so that
    /// different resources never collide and query strings never fragment.
    pub cache_key: String,
}

impl FreshnessHint {
    /// `Cache-Control` request directive expressing the hint.
    pub fn request_directive(&self) -> String {
        format!("max-age={}", self.ttl.as_secs())
    }
}

/// A fully resolved outbound fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: Url,
    pub hint: FreshnessHint,
}

/// Fetches scripts from the configured origin.
///
/// Cheap to clone: the underlying client pools connections behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScriptFetcher {
    client: reqwest::Client,
    base: Url,
    ttl: Duration,
    timeout: Duration,
}

impl ScriptFetcher {
    /// Build a fetcher from upstream configuration.
    ///
    /// The client has a connect timeout but no total timeout, which would
    /// also cut off slow body streams; the header deadline is applied per
    /// fetch instead.
    pub fn new(config: &UpstreamConfig) -> RouterResult<Self> {
        let base = Url::parse(&config.base_url).map_err(RouterError::InvalidBaseUrl)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(RouterError::Client)?;

        Ok(Self {
            client,
            base,
            ttl: Duration::from_secs(config.cache_ttl_secs),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolve the URL and freshness hint for `resource`.
    pub fn request_for(&self, resource: &str) -> RouterResult<UpstreamRequest> {
        let url = self
            .base
            .join(resource)
            .map_err(|source| RouterError::InvalidUpstreamUrl {
                resource: resource.to_string(),
                source,
            })?;

        Ok(UpstreamRequest {
            url,
            hint: FreshnessHint {
                ttl: self.ttl,
                cache_key: resource.to_string(),
            },
        })
    }

    /// Issue the single GET for `request`.
    ///
    /// Returns once response headers have arrived; the body is left for the
    /// caller to stream. Any status code is a successful fetch.
    pub async fn fetch(&self, request: &UpstreamRequest) -> RouterResult<reqwest::Response> {
        let start = Instant::now();

        tracing::debug!(
            url = %request.url,
            cache_key = %request.hint.cache_key,
            ttl_secs = request.hint.ttl.as_secs(),
            "Fetching script"
        );

        let send = self
            .client
            .get(request.url.clone())
            .header(CACHE_CONTROL, request.hint.request_directive())
            .send();

        let response = with_deadline(self.timeout, send)
            .await?
            .map_err(RouterError::Upstream)?;

        tracing::debug!(
            url = %request.url,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> ScriptFetcher {
        ScriptFetcher::new(&UpstreamConfig {
            base_url: base.to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_request_for_joins_base() {
        let fetcher = fetcher("https://raw.githubusercontent.com/henrygd/beszel/main/supplemental/scripts/");
        let request = fetcher.request_for("install-agent.ps1").unwrap();

        assert_eq!(
            request.url.as_str(),
            "https://raw.githubusercontent.com/henrygd/beszel/main/supplemental/scripts/install-agent.ps1"
        );
        assert_eq!(request.hint.cache_key, "install-agent.ps1");
        assert_eq!(request.hint.ttl, Duration::from_secs(600));
        assert_eq!(request.hint.request_directive(), "max-age=600");
    }

    #[test]
    fn test_invalid_base() {
        let err = ScriptFetcher::new(&UpstreamConfig {
            base_url: "not a url".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, RouterError::InvalidBaseUrl(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_upstream_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = fetcher(&format!("http://{addr}/scripts/"));
        let request = fetcher.request_for("install-agent.sh").unwrap();
        let err = fetcher.fetch(&request).await.unwrap_err();

        assert!(matches!(err, RouterError::Upstream(_)), "got {err}");
    }
}
