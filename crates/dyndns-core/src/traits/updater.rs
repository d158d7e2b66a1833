// # Updater Trait
//
// Defines the interface for propagating resolved addresses to an external
// record set.
//
// ## Implementations
//
// - DNS authority reconciler: `crate::reconcile::DnsRecordUpdater`, backed by
//   a provider-specific `DnsAuthority` (e.g. `dyndns-updater-cloudflare`)
//
// ## Failure Semantics
//
// An updater failure is fatal to that updater for that cycle only. The worker
// logs it and invokes the remaining updaters; the next scheduled cycle is the
// implicit retry, since worker state already reflects the new address.

use async_trait::async_trait;

use crate::address::IpAddress;
use crate::config::UpdateRecordEntry;
use crate::error::Result;

/// Trait for updater implementations
///
/// An absent family argument means "no change to propagate for this family
/// this cycle"; the updater must not touch records of an absent family.
#[async_trait]
pub trait Updater: Send + Sync {
    /// Propagate the given addresses
    async fn apply(&self, ipv4: Option<&IpAddress>, ipv6: Option<&IpAddress>) -> Result<()>;
}

/// Helper trait for constructing updaters from configuration
pub trait UpdaterFactory: Send + Sync {
    /// Create an Updater instance from the type-specific config payload and
    /// the statically configured record entries
    fn create(
        &self,
        config: &serde_json::Value,
        update_records: &[UpdateRecordEntry],
    ) -> Result<Box<dyn Updater>>;
}
