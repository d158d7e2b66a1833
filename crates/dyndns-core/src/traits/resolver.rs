// # Resolver Trait
//
// Defines the interface for discovering the caller's current public IP
// addresses.
//
// ## Implementations
//
// - Web-based (plain-text IP endpoints): `dyndns-resolver-web` crate
// - Future: router/UPnP queries, interface inspection
//
// ## Failure Semantics
//
// A resolver that cannot produce a result returns `Error::Resolution`. The
// resolver itself simply propagates its failure; deciding what to do with it
// is the chain's job (log, drop, continue with the next resolver). A partial
// pair — only one family, or neither — is a normal successful result.

use async_trait::async_trait;

use crate::address::ResolvedPair;
use crate::error::Result;

/// Trait for resolver implementations
///
/// Implementations must be thread-safe and usable across async tasks. They
/// must not spawn background tasks and must not cache results across calls;
/// every invocation produces a fresh pair.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve the current public address(es)
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedPair)`: the addresses found this invocation; either or
    ///   both families may be absent
    /// - `Err(Error)`: the resolver could not produce a usable result
    async fn resolve(&self) -> Result<ResolvedPair>;
}

/// Helper trait for constructing resolvers from configuration
pub trait ResolverFactory: Send + Sync {
    /// Create a Resolver instance from the type-specific config payload
    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn Resolver>>;
}
