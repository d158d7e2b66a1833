//! Core traits for the dyndns system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Resolver`]: Discover the current public address(es)
//! - [`Updater`]: Propagate address changes to an external record set
//! - [`DnsAuthority`]: Zone/record API of a remote DNS provider

pub mod dns_authority;
pub mod resolver;
pub mod updater;

pub use dns_authority::{DnsAuthority, DnsRecord, Zone};
pub use resolver::{Resolver, ResolverFactory};
pub use updater::{Updater, UpdaterFactory};
