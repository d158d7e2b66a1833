//! Plugin-based factory registry
//!
//! Resolvers and updaters are registered by type name at startup, avoiding
//! hardcoded if-else chains in the core. Configuration carries the type name
//! as a discriminant string; an unknown name is a configuration error at
//! construction time, never at cycle time.
//!
//! ## Registration
//!
//! Implementation crates should expose a `register()` entry point:
//!
//! ```rust,ignore
//! // In dyndns-resolver-web
//! pub fn register(registry: &Registry) {
//!     registry.register_resolver("web", Box::new(WebResolverFactory));
//! }
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use crate::config::{ResolverConfig, UpdaterConfig};
use crate::error::{Error, Result};
use crate::traits::{Resolver, ResolverFactory, Updater, UpdaterFactory};

/// Registry of resolver and updater factories
///
/// Uses interior mutability with RwLock, allowing concurrent reads and
/// exclusive writes.
#[derive(Default)]
pub struct Registry {
    resolvers: RwLock<HashMap<String, Box<dyn ResolverFactory>>>,
    updaters: RwLock<HashMap<String, Box<dyn UpdaterFactory>>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver factory under a type name
    pub fn register_resolver(&self, name: impl Into<String>, factory: Box<dyn ResolverFactory>) {
        let mut resolvers = self.resolvers.write().unwrap();
        resolvers.insert(name.into(), factory);
    }

    /// Register an updater factory under a type name
    pub fn register_updater(&self, name: impl Into<String>, factory: Box<dyn UpdaterFactory>) {
        let mut updaters = self.updaters.write().unwrap();
        updaters.insert(name.into(), factory);
    }

    /// Create a resolver from configuration
    ///
    /// Fails with a configuration error if the type name is not registered.
    pub fn create_resolver(&self, config: &ResolverConfig) -> Result<Box<dyn Resolver>> {
        let resolvers = self.resolvers.read().unwrap();
        let factory = resolvers
            .get(&config.kind)
            .ok_or_else(|| Error::config(format!("Unknown resolver type: {}", config.kind)))?;
        factory.create(&config.config)
    }

    /// Create an updater from configuration
    ///
    /// Fails with a configuration error if the type name is not registered.
    pub fn create_updater(&self, config: &UpdaterConfig) -> Result<Box<dyn Updater>> {
        let updaters = self.updaters.read().unwrap();
        let factory = updaters
            .get(&config.kind)
            .ok_or_else(|| Error::config(format!("Unknown updater type: {}", config.kind)))?;
        factory.create(&config.config, &config.update_records)
    }

    /// List all registered resolver types
    pub fn list_resolvers(&self) -> Vec<String> {
        self.resolvers.read().unwrap().keys().cloned().collect()
    }

    /// List all registered updater types
    pub fn list_updaters(&self) -> Vec<String> {
        self.updaters.read().unwrap().keys().cloned().collect()
    }

    /// Check if a resolver type is registered
    pub fn has_resolver(&self, name: &str) -> bool {
        self.resolvers.read().unwrap().contains_key(name)
    }

    /// Check if an updater type is registered
    pub fn has_updater(&self, name: &str) -> bool {
        self.updaters.read().unwrap().contains_key(name)
    }
}
