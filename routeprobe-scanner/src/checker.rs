use crate::error::{Result, ScanError};
use crate::headers::snapshot_headers;
use crate::result::RouteResult;
use crate::route::RouteDescriptor;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Per-request timeout for route checks.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the liveness probe sent before a run.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("routeprobe/", env!("CARGO_PKG_VERSION"));

/// Issues one GET per route against a base URL and records what came back.
pub struct Checker {
    base_url: Url,
    client: Client,
    probe_client: Client,
    timeout: Duration,
}

impl Checker {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ScanError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        // Redirects are observed as-is, never followed
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let probe_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REACHABILITY_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            client,
            probe_client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Join a route path onto the base URL. An absolute path replaces the
    /// base's path component.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ScanError::InvalidUrl(format!("{} against {}: {}", path, self.base_url, e)))
    }

    /// Check a single route. Transport failures are folded into an `ERROR`
    /// result so this never fails.
    pub async fn check_route(&self, route: &RouteDescriptor) -> RouteResult {
        match self.fetch(route).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Check failed for {}: {}", route.path, e);
                RouteResult::with_error(route.clone(), e.to_string())
            }
        }
    }

    async fn fetch(&self, route: &RouteDescriptor) -> Result<RouteResult> {
        let url = self.resolve(&route.path)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status_code = response.status().as_u16();
        let headers = snapshot_headers(response.headers());
        let body = response.bytes().await?;

        debug!("{} -> {} ({} bytes)", url, status_code, body.len());
        Ok(RouteResult::new(
            route.clone(),
            status_code,
            headers,
            body.len() as u64,
        ))
    }

    /// True only when a GET to the base URL answers 200 within
    /// [`REACHABILITY_TIMEOUT`]. Redirects are followed for this probe.
    pub async fn is_server_reachable(&self) -> bool {
        match self.probe_client.get(self.base_url.clone()).send().await {
            Ok(response) => {
                let reachable = response.status() == StatusCode::OK;
                info!(
                    "Server at {} answered {} (reachable: {})",
                    self.base_url,
                    response.status(),
                    reachable
                );
                reachable
            }
            Err(e) => {
                info!("Server at {} is not reachable: {}", self.base_url, e);
                false
            }
        }
    }
}
