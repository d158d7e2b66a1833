// # Web Resolver
//
// This crate provides a web-based public IP resolver for the dyndns system.
//
// ## Architecture
//
// Fetches the current public address from plain-text IP echo services
// (e.g. api.ipify.org, icanhazip.com). IPv4 and IPv6 endpoints are configured
// separately because discovery of each family requires connecting over that
// family; either endpoint may be omitted, in which case the resolver returns
// a partial pair and later resolvers in the chain fill the gap.
//
// ## Failure Semantics
//
// Any HTTP failure, non-success status, or body that does not validate as an
// address of the expected family surfaces as a resolution error. The chain
// isolates it; this crate never decides what happens next.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use dyndns_core::address::{Family, IpAddress, ResolvedPair};
use dyndns_core::traits::{Resolver, ResolverFactory};
use dyndns_core::{Error, Registry, Result};

/// Default HTTP timeout for echo-service requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration payload for the `web` resolver type
#[derive(Debug, Clone, Deserialize)]
pub struct WebResolverConfig {
    /// Plain-text endpoint returning the caller's IPv4 address
    #[serde(default)]
    pub ipv4_url: Option<String>,

    /// Plain-text endpoint returning the caller's IPv6 address
    #[serde(default)]
    pub ipv6_url: Option<String>,
}

/// Web-based public IP resolver
pub struct WebResolver {
    ipv4_url: Option<String>,
    ipv6_url: Option<String>,
    client: reqwest::Client,
}

impl WebResolver {
    /// Create a new web resolver
    ///
    /// At least one endpoint must be configured; a resolver that can resolve
    /// neither family is a configuration error.
    pub fn new(config: WebResolverConfig) -> Result<Self> {
        if config.ipv4_url.is_none() && config.ipv6_url.is_none() {
            return Err(Error::config(
                "Web resolver must configure an IPv4 endpoint, an IPv6 endpoint, or both",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            ipv4_url: config.ipv4_url,
            ipv6_url: config.ipv6_url,
            client,
        })
    }

    /// Fetch one endpoint and validate the body as an address of `family`
    async fn fetch(&self, family: Family, url: &str) -> Result<IpAddress> {
        tracing::debug!("Fetching {} address from {}", family, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::resolution(format!("Request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::resolution(format!(
                "{url} answered with status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::resolution(format!("Failed to read response from {url}: {e}")))?;

        // IpAddress::new trims; an unparseable body escalates to resolution.
        let address = IpAddress::new(family, &body)
            .map_err(|e| Error::resolution(format!("{url}: {e}")))?;

        tracing::debug!("Resolved {} address: {}", family, address);
        Ok(address)
    }
}

#[async_trait]
impl Resolver for WebResolver {
    async fn resolve(&self) -> Result<ResolvedPair> {
        let mut result = ResolvedPair::empty();
        if let Some(url) = &self.ipv4_url {
            result.ipv4 = Some(self.fetch(Family::V4, url).await?);
        }
        if let Some(url) = &self.ipv6_url {
            result.ipv6 = Some(self.fetch(Family::V6, url).await?);
        }
        Ok(result)
    }
}

/// Factory for creating web resolvers
pub struct WebResolverFactory;

impl ResolverFactory for WebResolverFactory {
    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn Resolver>> {
        let config: WebResolverConfig = serde_json::from_value(config.clone())
            .map_err(|e| Error::config(format!("Invalid web resolver config: {e}")))?;
        Ok(Box::new(WebResolver::new(config)?))
    }
}

/// Register the web resolver with a registry
pub fn register(registry: &Registry) {
    registry.register_resolver("web", Box::new(WebResolverFactory));
}
