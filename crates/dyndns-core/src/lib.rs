// # dyndns-core
//
// Core library for the dyndns reconciliation loop.
//
// ## Architecture Overview
//
// This library provides the core functionality for dynamic DNS updates:
// - **IpAddress / ResolvedPair**: Validated address values and per-family pairs
// - **Resolver**: Trait for discovering the current public address(es)
// - **Updater**: Trait for propagating address changes to an external authority
// - **DnsAuthority**: Contract over a remote zone/record API, consumed by the
//   built-in record reconciler
// - **Worker**: Scheduling loop that resolves, detects changes, and applies them
// - **Registry**: Plugin-based registry for resolver and updater factories
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Orchestration lives here, transports live in
//    the resolver/updater crates
// 2. **Plugin-Based**: Variants are registered by type name, no hard-coded if-else
// 3. **Cycle-Scoped Derivation**: Zone/record bindings are rebuilt every cycle,
//    never cached across cycles
// 4. **Failure Isolation**: One resolver or updater failing never takes down the
//    rest of the cycle

pub mod address;
pub mod chain;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod registry;
pub mod state;
pub mod traits;
pub mod worker;

// Re-export core types for convenience
pub use address::{Family, IpAddress, ResolvedPair};
pub use config::{AppConfig, ResolverConfig, UpdateRecordEntry, UpdaterConfig, WorkerConfig};
pub use error::{Error, Result};
pub use reconcile::DnsRecordUpdater;
pub use registry::Registry;
pub use state::WorkerState;
pub use traits::{DnsAuthority, Resolver, Updater};
pub use worker::Worker;
