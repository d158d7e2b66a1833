// # DNS Authority Trait
//
// Contract over a remote DNS provider's zone/record API, as consumed by the
// record reconciler in `crate::reconcile`.
//
// The authority exposes inventory lookup and record mutation but no native
// "upsert by hostname" operation; the reconciler builds upsert on top of these
// four calls.
//
// ## Failure Semantics
//
// Implementations must surface an embedded error list in an otherwise
// well-formed response as `Error::RemoteApi`, regardless of the transport
// status. A transport failure without a parseable response is `Error::Http`.

use async_trait::async_trait;

use crate::error::Result;

/// A zone owned by the account at the remote authority
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Zone {
    /// Provider-assigned zone identifier
    pub id: String,
    /// Apex name of the zone (e.g. "example.com")
    pub name: String,
}

/// A DNS record inside a zone
///
/// `kind` is the provider's record type string ("A", "AAAA", but also "TXT",
/// "MX", ...); records of unrelated types flow through the inventory and are
/// ignored by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DnsRecord {
    /// Provider-assigned record identifier
    pub id: String,
    /// Record type string
    #[serde(rename = "type")]
    pub kind: String,
    /// Fully qualified record name
    pub name: String,
}

/// Trait for remote DNS authority implementations
///
/// Implementations are transport adapters only: one API call per method, no
/// retry, no caching, no knowledge of what the reconciler does with the data.
#[async_trait]
pub trait DnsAuthority: Send + Sync {
    /// List all zones owned by the account
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// List the DNS records of one zone
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;

    /// Create a record; returns the provider-assigned record id
    async fn create_record(
        &self,
        zone_id: &str,
        kind: &str,
        name: &str,
        content: &str,
    ) -> Result<String>;

    /// Overwrite a record's content; returns the record id
    async fn update_record(&self, zone_id: &str, record_id: &str, content: &str)
    -> Result<String>;
}
