//! Record locator
//!
//! [`DnsInfoProvider`] answers "which records exist" questions by listing
//! all records of a domain through the [`DnsClient`] and filtering them
//! locally. Results keep the order the provider returned them in.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use deens_core::{DnsInfoProvider, RecordLocator, RecordType};
//!
//! let locator = DnsInfoProvider::new(client);
//! let record = locator
//!     .get_subdomain_record("example.com", "www", RecordType::Aaaa)
//!     .await?;
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::{DnsClient, Record, RecordLocator, RecordType};
use crate::validation::fqdn;

/// Record locator backed by a DNS client
#[derive(Clone)]
pub struct DnsInfoProvider {
    client: Arc<dyn DnsClient>,
}

impl DnsInfoProvider {
    /// Create a locator that reads through the given client
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self { client }
    }

    /// All records of `domain` for which `include` returns true
    ///
    /// Provider order is preserved. Fails if the record listing fails.
    pub async fn list_records_matching<F>(&self, domain: &str, include: F) -> Result<Vec<Record>>
    where
        F: Fn(&Record) -> bool + Send,
    {
        let records = self.client.list_records(domain).await?;
        let total = records.len();

        let matching: Vec<Record> = records.into_iter().filter(|r| include(r)).collect();

        debug!(
            "Listed records for {}: {} of {} match",
            domain,
            matching.len(),
            total
        );
        Ok(matching)
    }
}

impl std::fmt::Debug for DnsInfoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsInfoProvider")
            .field("client", &self.client.provider_name())
            .finish()
    }
}

#[async_trait]
impl RecordLocator for DnsInfoProvider {
    async fn list_domain_names(&self) -> Result<Vec<String>> {
        let domains = self.client.list_domains().await?;
        Ok(domains.into_iter().map(|domain| domain.name).collect())
    }

    async fn list_domain_records(&self, domain: &str) -> Result<Vec<Record>> {
        self.list_records_matching(domain, |_| true).await
    }

    async fn get_subdomain_record(
        &self,
        domain: &str,
        subdomain: &str,
        record_type: RecordType,
    ) -> Result<Record> {
        let wanted_type = record_type.as_str();
        let records = self
            .list_records_matching(domain, |record| {
                record.name == subdomain && record.record_type == wanted_type
            })
            .await?;

        // Duplicates of the same name and type are possible; the first one wins.
        records.into_iter().next().ok_or_else(|| {
            Error::not_found(format!(
                "No {} record found for {}",
                record_type,
                fqdn(subdomain, domain)
            ))
        })
    }

    async fn list_subdomain_records(&self, domain: &str, subdomain: &str) -> Result<Vec<Record>> {
        self.list_records_matching(domain, |record| record.name == subdomain)
            .await
    }
}
