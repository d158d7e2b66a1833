//! Per-worker change detection
//!
//! `WorkerState` holds the last-known-good address per family for one worker.
//! It lives in process memory only: a restart forgets prior state, so the
//! first cycle after a restart treats whatever it resolves as changed. That
//! is intentional — the first update after a restart is harmless.

use tracing::info;

use crate::address::ResolvedPair;

/// Last-known-good addresses for one worker
///
/// Owned exclusively by one worker and mutated only by its update cycle.
#[derive(Debug, Default)]
pub struct WorkerState {
    inner: ResolvedPair,
}

impl WorkerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare a fresh resolution against the stored state
    ///
    /// Per family, independently: the family is changed if a fresh value is
    /// present and there either was no previous value or the fresh value
    /// differs from it. An absent fresh value is never a change — a resolver
    /// gap must not be read as "address removed" — and never clears state.
    ///
    /// Changed families are written back to the state and emitted in the
    /// returned delta pair. In force mode the return value is instead a full
    /// snapshot of the state after detection, so updaters run every cycle.
    pub fn observe(&mut self, fresh: ResolvedPair, force: bool) -> ResolvedPair {
        let mut delta = ResolvedPair::empty();

        if let Some(ipv4) = fresh.ipv4 {
            if self.inner.ipv4.as_ref() != Some(&ipv4) {
                info!(
                    "IPv4 changed {} -> {}",
                    self.inner
                        .ipv4
                        .as_ref()
                        .map(|a| a.to_string())
                        .unwrap_or_else(|| "<none>".to_string()),
                    ipv4
                );
                self.inner.ipv4 = Some(ipv4.clone());
                delta.ipv4 = Some(ipv4);
            }
        }

        if let Some(ipv6) = fresh.ipv6 {
            if self.inner.ipv6.as_ref() != Some(&ipv6) {
                info!(
                    "IPv6 changed {} -> {}",
                    self.inner
                        .ipv6
                        .as_ref()
                        .map(|a| a.to_string())
                        .unwrap_or_else(|| "<none>".to_string()),
                    ipv6
                );
                self.inner.ipv6 = Some(ipv6.clone());
                delta.ipv6 = Some(ipv6);
            }
        }

        if force { self.inner.clone() } else { delta }
    }

    /// The current last-known-good pair
    pub fn current(&self) -> &ResolvedPair {
        &self.inner
    }
}
