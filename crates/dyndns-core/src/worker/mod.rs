//! Worker scheduling loop
//!
//! One worker is one independent reconciliation loop: an ordered resolver
//! chain, a change-detection state, and a list of updaters, driven by a
//! repeating timer. A process may host many workers; they share nothing.
//!
//! ## Cycle Flow
//!
//! 1. Resolve through the chain (gaps filled in order, errors skipped)
//! 2. Detect per-family changes against the worker's last-known state
//! 3. Invoke updaters sequentially with the delta (or the full state in
//!    force mode); one updater's failure does not stop the next
//!
//! ## Scheduling
//!
//! On start the worker runs one cycle immediately, then ticks at the
//! configured interval. Cycles are serialized per worker: a cycle that
//! outlasts the interval delays the next tick instead of overlapping with it.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::chain::resolve_chain;
use crate::config::WorkerConfig;
use crate::error::Result;
use crate::registry::Registry;
use crate::state::WorkerState;
use crate::traits::{Resolver, Updater};

/// One independent reconciliation loop
pub struct Worker {
    interval: Duration,
    force: bool,
    resolvers: Vec<Box<dyn Resolver>>,
    updaters: Vec<Box<dyn Updater>>,
    state: WorkerState,
}

impl Worker {
    /// Build a worker from configuration
    ///
    /// Fails fast with a configuration error on a zero interval, an empty
    /// resolver chain, or a resolver/updater type name the registry does not
    /// know. Nothing is deferred to cycle time.
    pub fn new(config: WorkerConfig, registry: &Registry) -> Result<Self> {
        config.validate()?;

        let mut resolvers = Vec::with_capacity(config.resolvers.len());
        for resolver_config in &config.resolvers {
            debug!("Initializing resolver of type {}", resolver_config.kind);
            resolvers.push(registry.create_resolver(resolver_config)?);
        }

        let mut updaters = Vec::with_capacity(config.updaters.len());
        for updater_config in &config.updaters {
            debug!("Initializing updater of type {}", updater_config.kind);
            updaters.push(registry.create_updater(updater_config)?);
        }

        Ok(Self {
            interval: Duration::from_secs(config.interval_secs),
            force: config.force,
            resolvers,
            updaters,
            state: WorkerState::new(),
        })
    }

    /// Construct directly from parts (used by tests and embedders)
    pub fn from_parts(
        interval: Duration,
        force: bool,
        resolvers: Vec<Box<dyn Resolver>>,
        updaters: Vec<Box<dyn Updater>>,
    ) -> Self {
        Self {
            interval,
            force,
            resolvers,
            updaters,
            state: WorkerState::new(),
        }
    }

    /// Run one update cycle: resolve, detect, apply
    pub async fn update(&mut self) {
        debug!("Updating...");

        let fresh = resolve_chain(&self.resolvers).await;
        let emit = self.state.observe(fresh, self.force);

        for (index, updater) in self.updaters.iter().enumerate() {
            if let Err(e) = updater.apply(emit.ipv4.as_ref(), emit.ipv6.as_ref()).await {
                // Isolated per updater per cycle; the next scheduled cycle
                // retries naturally since state already holds the new address.
                error!("Updater #{} failed this cycle: {}", index + 1, e);
            }
        }
    }

    /// Run the worker until the process receives a shutdown signal
    pub async fn run(&mut self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Run the worker until the given channel fires (for tests and daemons
    /// coordinating shutdown across workers)
    pub async fn run_until(&mut self, shutdown: tokio::sync::oneshot::Receiver<()>) -> Result<()> {
        self.run_internal(Some(shutdown)).await
    }

    async fn run_internal(
        &mut self,
        shutdown: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        info!("Started.");
        self.update().await;

        let mut ticker = tokio::time::interval(self.interval);
        // A slow cycle delays the next tick rather than stacking a burst of
        // make-up cycles behind it.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and is already covered by the
        // startup cycle above.
        ticker.tick().await;

        if let Some(mut shutdown) = shutdown {
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.update().await,
                    _ = &mut shutdown => {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        } else {
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.update().await,
                    _ = tokio::signal::ctrl_c() => {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// The worker's current last-known-good addresses
    pub fn state(&self) -> &WorkerState {
        &self.state
    }
}
