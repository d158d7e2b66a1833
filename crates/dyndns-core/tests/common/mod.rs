//! Test doubles and common utilities for the contract tests

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dyndns_core::address::{IpAddress, ResolvedPair};
use dyndns_core::error::{Error, Result};
use dyndns_core::traits::{DnsAuthority, DnsRecord, Resolver, Updater, Zone};

/// A resolver that returns a scripted pair (or error) and counts invocations
pub struct ScriptedResolver {
    result: Option<ResolvedPair>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedResolver {
    /// Resolver returning the given pair on every call
    pub fn returning(pair: ResolvedPair) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                result: Some(pair),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    /// Resolver failing with a resolution error on every call
    pub fn failing() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                result: None,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait::async_trait]
impl Resolver for ScriptedResolver {
    async fn resolve(&self) -> Result<ResolvedPair> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Some(pair) => Ok(pair.clone()),
            None => Err(Error::resolution("scripted failure")),
        }
    }
}

/// An updater that records every apply as `(ipv4, ipv6)` textual values
pub struct RecordingUpdater {
    applies: Arc<std::sync::Mutex<Vec<(Option<String>, Option<String>)>>>,
    fail: bool,
}

impl RecordingUpdater {
    pub fn new() -> (Self, Arc<std::sync::Mutex<Vec<(Option<String>, Option<String>)>>>) {
        let applies = Arc::new(std::sync::Mutex::new(Vec::new()));
        (
            Self {
                applies: Arc::clone(&applies),
                fail: false,
            },
            applies,
        )
    }

    /// An updater that records the apply and then fails
    pub fn failing() -> (Self, Arc<std::sync::Mutex<Vec<(Option<String>, Option<String>)>>>) {
        let applies = Arc::new(std::sync::Mutex::new(Vec::new()));
        (
            Self {
                applies: Arc::clone(&applies),
                fail: true,
            },
            applies,
        )
    }
}

#[async_trait::async_trait]
impl Updater for RecordingUpdater {
    async fn apply(&self, ipv4: Option<&IpAddress>, ipv6: Option<&IpAddress>) -> Result<()> {
        self.applies.lock().unwrap().push((
            ipv4.map(|a| a.to_string()),
            ipv6.map(|a| a.to_string()),
        ));
        if self.fail {
            return Err(Error::update("scripted updater failure"));
        }
        Ok(())
    }
}

/// In-memory DNS authority with a call log
///
/// Clones share the same underlying state, so a test can keep a handle while
/// the updater owns a boxed clone.
#[derive(Clone, Default)]
pub struct MockAuthority {
    zones: Arc<std::sync::Mutex<Vec<(Zone, Vec<DnsRecord>)>>>,
    calls: Arc<std::sync::Mutex<Vec<String>>>,
    next_id: Arc<AtomicUsize>,
    fail_list_records: Arc<AtomicBool>,
    embedded_errors: Arc<AtomicBool>,
}

impl MockAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone with pre-existing records
    pub fn with_zone(self, id: &str, name: &str, records: &[(&str, &str, &str)]) -> Self {
        let records = records
            .iter()
            .map(|(id, kind, name)| DnsRecord {
                id: id.to_string(),
                kind: kind.to_string(),
                name: name.to_string(),
            })
            .collect();
        self.zones.lock().unwrap().push((
            Zone {
                id: id.to_string(),
                name: name.to_string(),
            },
            records,
        ));
        self
    }

    /// Make `list_records` fail (inventory fetch failure)
    pub fn fail_list_records(&self) {
        self.fail_list_records.store(true, Ordering::SeqCst);
    }

    /// Make every mutation respond with an embedded error list
    pub fn respond_with_embedded_errors(&self) {
        self.embedded_errors.store(true, Ordering::SeqCst);
    }

    /// The ordered log of calls made against this authority
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsAuthority for MockAuthority {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.calls.lock().unwrap().push("list_zones".to_string());
        Ok(self
            .zones
            .lock()
            .unwrap()
            .iter()
            .map(|(zone, _)| zone.clone())
            .collect())
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("list_records {zone_id}"));
        if self.fail_list_records.load(Ordering::SeqCst) {
            return Err(Error::remote_api("1003: Invalid or missing zone id"));
        }
        let zones = self.zones.lock().unwrap();
        let (_, records) = zones
            .iter()
            .find(|(zone, _)| zone.id == zone_id)
            .ok_or_else(|| Error::remote_api(format!("7003: No such zone {zone_id}")))?;
        Ok(records.clone())
    }

    async fn create_record(
        &self,
        zone_id: &str,
        kind: &str,
        name: &str,
        content: &str,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create {zone_id} {kind} {name} {content}"));
        if self.embedded_errors.load(Ordering::SeqCst) {
            return Err(Error::remote_api("81057: Record already exists"));
        }
        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut zones = self.zones.lock().unwrap();
        if let Some((_, records)) = zones.iter_mut().find(|(zone, _)| zone.id == zone_id) {
            records.push(DnsRecord {
                id: id.clone(),
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }
        Ok(id)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        content: &str,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("update {zone_id} {record_id} {content}"));
        if self.embedded_errors.load(Ordering::SeqCst) {
            return Err(Error::remote_api("81044: Record does not exist"));
        }
        Ok(record_id.to_string())
    }
}

/// Shorthand for a v4-only pair
pub fn v4_pair(value: &str) -> ResolvedPair {
    ResolvedPair {
        ipv4: Some(IpAddress::v4(value).unwrap()),
        ipv6: None,
    }
}

/// Shorthand for a v6-only pair
pub fn v6_pair(value: &str) -> ResolvedPair {
    ResolvedPair {
        ipv4: None,
        ipv6: Some(IpAddress::v6(value).unwrap()),
    }
}

/// Shorthand for a complete pair
pub fn full_pair(v4: &str, v6: &str) -> ResolvedPair {
    ResolvedPair {
        ipv4: Some(IpAddress::v4(v4).unwrap()),
        ipv6: Some(IpAddress::v6(v6).unwrap()),
    }
}
