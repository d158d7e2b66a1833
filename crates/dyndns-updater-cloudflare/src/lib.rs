// # Cloudflare DNS Authority
//
// This crate adapts the Cloudflare v4 REST API to the core's `DnsAuthority`
// contract. The reconciliation logic itself lives in
// `dyndns_core::reconcile`; this crate is a transport adapter only:
// one API call per method, no retry, no caching, no scheduling.
//
// ## Error Policy
//
// Every Cloudflare response, success or not, carries the envelope
// `{ "result": ..., "errors": [{ "code", "message" }], ... }`. A non-empty
// error list fails the call with the joined `code: message` pairs regardless
// of the HTTP status — Cloudflare reports some failures with a 200 and some
// successes arrive wrapped in 4xx proxies. A transport failure without a
// parseable response propagates as an HTTP error unchanged.
//
// ## Security
//
// - The API token NEVER appears in logs or Debug output
// - The adapter fails fast at construction if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones`
// - List DNS Records: GET `/zones/:zone_id/dns_records`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Update DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use dyndns_core::config::UpdateRecordEntry;
use dyndns_core::reconcile::DnsRecordUpdater;
use dyndns_core::traits::{DnsAuthority, DnsRecord, Updater, UpdaterFactory, Zone};
use dyndns_core::{Error, Registry, Result};

/// Cloudflare API base URL
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration payload for the `cloudflare` updater type
#[derive(Debug, Clone, Deserialize)]
pub struct CloudflareConfig {
    /// API token with Zone:Read and DNS:Edit permissions
    pub api_token: String,
}

/// One entry of the Cloudflare response error list
#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

/// The Cloudflare v4 response envelope
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    result: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

/// Result payload carrying only the record id
#[derive(Debug, Deserialize)]
struct RecordId {
    id: String,
}

/// Cloudflare v4 API adapter
pub struct CloudflareApi {
    /// ⚠️ NEVER log this value
    api_token: String,
    base_url: String,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareApi")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareApi {
    /// Create a new adapter against the public Cloudflare endpoint
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_token, CLOUDFLARE_API_BASE)
    }

    /// Create a new adapter against a custom base URL (for tests)
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_token,
            base_url: base_url.into(),
            client,
        })
    }

    /// Issue one API call and unwrap the response envelope
    ///
    /// The embedded error list is checked before the result is handed out,
    /// independent of the HTTP status.
    async fn request<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to {path} failed: {e}")))?;

        let status = response.status();
        let envelope: ApiEnvelope<T> = response.json().await.map_err(|e| {
            Error::remote_api(format!(
                "Unparseable response from {path} (status {status}): {e}"
            ))
        })?;

        if !envelope.errors.is_empty() {
            return Err(Error::remote_api(join_errors(&envelope.errors)));
        }

        envelope.result.ok_or_else(|| {
            Error::remote_api(format!("Missing result in response from {path} (status {status})"))
        })
    }
}

#[async_trait]
impl DnsAuthority for CloudflareApi {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.request(reqwest::Method::GET, "zones", None).await
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.request(
            reqwest::Method::GET,
            &format!("zones/{zone_id}/dns_records"),
            None,
        )
        .await
    }

    async fn create_record(
        &self,
        zone_id: &str,
        kind: &str,
        name: &str,
        content: &str,
    ) -> Result<String> {
        tracing::debug!("Creating {} record {} in zone {}", kind, name, zone_id);
        let created: RecordId = self
            .request(
                reqwest::Method::POST,
                &format!("zones/{zone_id}/dns_records"),
                Some(serde_json::json!({
                    "type": kind,
                    "name": name,
                    "content": content,
                })),
            )
            .await?;
        Ok(created.id)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<String> {
        tracing::debug!("Updating record {} in zone {}", record_id, zone_id);
        let updated: RecordId = self
            .request(
                reqwest::Method::PATCH,
                &format!("zones/{zone_id}/dns_records/{record_id}"),
                Some(serde_json::json!({ "content": content })),
            )
            .await?;
        Ok(updated.id)
    }
}

/// Join the authority's error list into `code: message` pairs
fn join_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Factory for creating Cloudflare-backed record updaters
pub struct CloudflareUpdaterFactory;

impl UpdaterFactory for CloudflareUpdaterFactory {
    fn create(
        &self,
        config: &serde_json::Value,
        update_records: &[UpdateRecordEntry],
    ) -> Result<Box<dyn Updater>> {
        let config: CloudflareConfig = serde_json::from_value(config.clone())
            .map_err(|e| Error::config(format!("Invalid cloudflare updater config: {e}")))?;
        let api = CloudflareApi::new(config.api_token)?;
        Ok(Box::new(DnsRecordUpdater::new(
            Box::new(api),
            update_records.to_vec(),
        )))
    }
}

/// Register the Cloudflare updater with a registry
pub fn register(registry: &Registry) {
    registry.register_updater("cloudflare", Box::new(CloudflareUpdaterFactory));
}
