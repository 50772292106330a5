// # Record Editor Trait
//
// The write path: create, update and delete subdomain address records.

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for editing subdomain address records
///
/// Each operation validates its input, performs at most one lookup and at
/// most one write, and aborts at the first failing step.
#[async_trait]
pub trait RecordEditor: Send + Sync {
    /// Create an address record for `subdomain.domain`
    ///
    /// The record type follows from the address family of `ip`. Fails with
    /// [`Error::AlreadyExists`](crate::Error::AlreadyExists) if a record
    /// of that name and type is already present.
    async fn create_subdomain(
        &self,
        domain: &str,
        subdomain: &str,
        ttl: u32,
        ip: Option<IpAddr>,
    ) -> Result<(), crate::Error>;

    /// Point the existing address record of `subdomain.domain` at `ip`
    ///
    /// Name, type and TTL of the existing record are kept. Fails with
    /// [`Error::NoUpdateRequired`](crate::Error::NoUpdateRequired) if the
    /// record already holds `ip`.
    async fn update_subdomain(
        &self,
        domain: &str,
        subdomain: &str,
        ip: Option<IpAddr>,
    ) -> Result<(), crate::Error>;

    /// Delete the address record of the given type ("A" or "AAAA")
    async fn delete_subdomain(
        &self,
        domain: &str,
        subdomain: &str,
        record_type: &str,
    ) -> Result<(), crate::Error>;
}
