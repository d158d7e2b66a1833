//! DNS record reconciliation
//!
//! The remote authority exposes zone/record lookup and mutation but no native
//! "upsert by hostname" operation. [`DnsRecordUpdater`] builds idempotent
//! upsert on top of the four [`DnsAuthority`] calls:
//!
//! 1. Fetch the full inventory (zones, then records per zone). Any failure
//!    here aborts the cycle's apply — no partial reconciliation against an
//!    incomplete inventory.
//! 2. Bind every configured entry to a zone: an existing record of the right
//!    type and exact name wins; otherwise a zone whose apex equals the
//!    hostname, or of which the hostname is a subdomain, binds with no record
//!    id (create on first apply). Entries no zone owns are dropped for the
//!    cycle.
//! 3. For each binding of a present family: update when a record id is known,
//!    create otherwise, storing the returned id back into the binding so a
//!    second mutation within the same apply would update rather than
//!    re-create.
//!
//! Bindings are rebuilt from scratch on every apply and discarded afterwards.
//! Repeated inventory fetches are the price for never holding a stale zone or
//! record id across cycles.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::address::{Family, IpAddress};
use crate::config::UpdateRecordEntry;
use crate::error::Result;
use crate::traits::{DnsAuthority, DnsRecord, Updater, Zone};

/// One zone together with its full record list
struct ZoneInventory {
    zone: Zone,
    records: Vec<DnsRecord>,
}

/// Cycle-scoped mapping from a configured hostname to a concrete zone and,
/// if the record already exists remotely, its record id
#[derive(Debug)]
struct Binding {
    family: Family,
    zone_id: String,
    hostname: String,
    record_id: Option<String>,
}

/// Updater that reconciles configured hostnames against a [`DnsAuthority`]
pub struct DnsRecordUpdater {
    authority: Box<dyn DnsAuthority>,
    entries: Vec<UpdateRecordEntry>,
}

impl DnsRecordUpdater {
    pub fn new(authority: Box<dyn DnsAuthority>, entries: Vec<UpdateRecordEntry>) -> Self {
        Self { authority, entries }
    }

    /// Fetch all zones and fan out into their record lists
    async fn load_inventory(&self) -> Result<Vec<ZoneInventory>> {
        let zones = self.authority.list_zones().await?;
        let mut inventory = Vec::with_capacity(zones.len());
        for zone in zones {
            let records = self.authority.list_records(&zone.id).await?;
            inventory.push(ZoneInventory { zone, records });
        }
        Ok(inventory)
    }

    /// Bind configured entries against the fetched inventory
    ///
    /// Zones are scanned in inventory order. Within a zone an exact record
    /// match (type matches the entry's family, name equals the hostname)
    /// takes precedence over the apex/subdomain fallback. Entries matching
    /// neither are dropped for this cycle.
    fn resolve_bindings(&self, inventory: &[ZoneInventory]) -> Vec<Binding> {
        let mut bindings = Vec::new();
        for entry in &self.entries {
            match find_zone_and_record(entry, inventory) {
                Some((zone_id, record_id)) => bindings.push(Binding {
                    family: entry.family,
                    zone_id,
                    hostname: entry.hostname.clone(),
                    record_id,
                }),
                None => {
                    debug!(
                        "No zone owns {} ({}), dropping entry for this cycle",
                        entry.hostname, entry.family
                    );
                }
            }
        }
        bindings
    }

    /// Create or update every binding of `ip`'s family
    ///
    /// The update call is issued unconditionally when a record id is bound,
    /// even if the remote content would be unchanged; suppression would
    /// require an extra content fetch per record and the call is already
    /// idempotent on the provider side.
    async fn push(&self, ip: &IpAddress, bindings: &mut [Binding]) -> Result<()> {
        for binding in bindings.iter_mut().filter(|b| b.family == ip.family()) {
            let record_id = match binding.record_id.as_deref() {
                Some(record_id) => {
                    info!(
                        "Update record {} for IP {} in zone {}",
                        record_id, ip, binding.zone_id
                    );
                    self.authority
                        .update_record(&binding.zone_id, record_id, ip.value())
                        .await?
                }
                None => {
                    info!(
                        "Create record {} for IP {} in zone {}",
                        binding.hostname, ip, binding.zone_id
                    );
                    self.authority
                        .create_record(
                            &binding.zone_id,
                            ip.family().record_type(),
                            &binding.hostname,
                            ip.value(),
                        )
                        .await?
                }
            };
            binding.record_id = Some(record_id);
        }
        Ok(())
    }
}

#[async_trait]
impl Updater for DnsRecordUpdater {
    async fn apply(&self, ipv4: Option<&IpAddress>, ipv6: Option<&IpAddress>) -> Result<()> {
        if ipv4.is_none() && ipv6.is_none() {
            debug!("No address changes to propagate this cycle");
            return Ok(());
        }

        let inventory = self.load_inventory().await?;
        let mut bindings = self.resolve_bindings(&inventory);
        debug!("Resolved {} binding(s) for this cycle", bindings.len());

        if let Some(ip) = ipv4 {
            self.push(ip, &mut bindings).await?;
        }
        if let Some(ip) = ipv6 {
            self.push(ip, &mut bindings).await?;
        }
        Ok(())
    }
}

/// Locate the zone (and existing record, if any) owning a configured entry
fn find_zone_and_record(
    entry: &UpdateRecordEntry,
    inventory: &[ZoneInventory],
) -> Option<(String, Option<String>)> {
    let wanted_type = entry.family.record_type();
    for item in inventory {
        for record in &item.records {
            if record.kind == wanted_type && record.name == entry.hostname {
                return Some((item.zone.id.clone(), Some(record.id.clone())));
            }
        }
        if item.zone.name == entry.hostname
            || entry.hostname.ends_with(&format!(".{}", item.zone.name))
        {
            return Some((item.zone.id.clone(), None));
        }
    }
    None
}
