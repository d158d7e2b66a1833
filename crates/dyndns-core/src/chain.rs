//! Resolver chain merge
//!
//! Combines an ordered list of resolvers into a single best-effort pair.
//! Later resolvers are only consulted to fill gaps left by earlier ones, so
//! invocation is deliberately sequential: concurrent fan-out would waste work
//! once both families are resolved and would break first-entry-wins semantics.

use tracing::{debug, warn};

use crate::address::ResolvedPair;
use crate::traits::Resolver;

/// Resolve through the chain, filling each family at most once
///
/// A resolver error is logged and treated as an empty pair; the chain moves
/// on. The loop stops early once both families are filled. Exhausting the
/// list with one or both families still absent returns the partial pair;
/// that is not an error.
pub async fn resolve_chain(resolvers: &[Box<dyn Resolver>]) -> ResolvedPair {
    let mut merged = ResolvedPair::empty();

    for (index, resolver) in resolvers.iter().enumerate() {
        match resolver.resolve().await {
            Ok(resolved) => merged.merge_missing(resolved),
            Err(e) => {
                warn!("Resolver #{} failed, continuing with next: {}", index + 1, e);
            }
        }

        if merged.is_complete() {
            debug!("Found both IPv4 and IPv6.");
            break;
        }
    }

    merged
}
