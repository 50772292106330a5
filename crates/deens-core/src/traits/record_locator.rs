// # Record Locator Trait
//
// The read path: resolves domain names and subdomain records by fetching the
// full record set of a domain and filtering it locally.

use async_trait::async_trait;

use super::dns_client::{Record, RecordType};

/// Trait for looking up domains and their records
///
/// Every call fetches fresh data from the DNS client. Client failures are
/// surfaced unchanged.
#[async_trait]
pub trait RecordLocator: Send + Sync {
    /// Names of all domains of the account, in provider order
    ///
    /// Returns an empty list when the account has no domains.
    async fn list_domain_names(&self) -> Result<Vec<String>, crate::Error>;

    /// All records of a domain, in provider order
    async fn list_domain_records(&self, domain: &str) -> Result<Vec<Record>, crate::Error>;

    /// The first record matching subdomain name and record type
    ///
    /// # Returns
    ///
    /// - `Ok(Record)`: The first match in provider order
    /// - `Err(Error::NotFound)`: No record matched
    /// - `Err(Error)`: The record listing failed
    async fn get_subdomain_record(
        &self,
        domain: &str,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<Record, crate::Error>;

    /// All records with the given subdomain name, of any type
    async fn list_subdomain_records(
        &self,
        domain: &str,
        subdomain: &str,
    ) -> Result<Vec<Record>, crate::Error>;
}
