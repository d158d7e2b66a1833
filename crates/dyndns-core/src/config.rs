//! Configuration types for the dyndns system
//!
//! These structures describe the shape of the configuration document; loading
//! and parsing the document itself is owned by the daemon crate. Resolver and
//! updater configs carry an opaque `config` payload that the matching factory
//! deserializes on its own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::Family;
use crate::error::{Error, Result};

/// Top-level configuration: one process hosts many independent workers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level for the tracing subscriber (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Independent reconciliation loops, each with its own resolvers/updaters
    pub workers: Vec<WorkerConfig>,
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers.is_empty() {
            return Err(Error::config("No workers configured"));
        }
        for worker in &self.workers {
            worker.validate()?;
        }
        Ok(())
    }
}

/// Configuration for one worker loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Seconds between update cycles; must be strictly positive
    pub interval_secs: u64,

    /// If true, updaters run with the full current state every cycle, even
    /// when nothing changed
    #[serde(default)]
    pub force: bool,

    /// Ordered resolver chain; later entries only fill gaps left by earlier ones
    pub resolvers: Vec<ResolverConfig>,

    /// Updaters invoked sequentially every cycle
    pub updaters: Vec<UpdaterConfig>,
}

impl WorkerConfig {
    /// Validate the worker configuration
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs == 0 {
            return Err(Error::config(format!(
                "Invalid worker interval: {}",
                self.interval_secs
            )));
        }
        if self.resolvers.is_empty() {
            return Err(Error::config("Worker has no resolvers configured"));
        }
        Ok(())
    }
}

/// One resolver entry: a type discriminant plus a factory-owned payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Resolver type name (e.g. "web"); unknown names fail at startup
    #[serde(rename = "type")]
    pub kind: String,

    /// Type-specific configuration, interpreted by the matching factory
    #[serde(default)]
    pub config: Value,
}

/// One updater entry: a type discriminant, a factory-owned payload, and the
/// records the updater is responsible for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Updater type name (e.g. "cloudflare"); unknown names fail at startup
    #[serde(rename = "type")]
    pub kind: String,

    /// Type-specific configuration, interpreted by the matching factory
    #[serde(default)]
    pub config: Value,

    /// Which hostnames track which address family
    #[serde(default)]
    pub update_records: Vec<UpdateRecordEntry>,
}

/// Static mapping from a hostname to the address family it tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordEntry {
    /// Address family (v4 → A record, v6 → AAAA record)
    pub family: Family,

    /// Fully qualified record name (e.g. "host.example.com")
    pub hostname: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
