//! Record editor
//!
//! [`DnsEditor`] implements the create/update/delete workflow for subdomain
//! address records. Every operation follows the same pipeline:
//!
//! ```text
//! validate input ──▶ look up existing record ──▶ apply policy ──▶ one write
//!                       (RecordLocator)                          (DnsClient)
//! ```
//!
//! The lookup is shared; the policies differ:
//!
//! | operation | wants the record to be | write            |
//! |-----------|------------------------|------------------|
//! | create    | absent                 | `create_record`  |
//! | update    | present, other address | `update_record`  |
//! | delete    | present                | `delete_record`  |
//!
//! There are no retries and no compensating actions. Client errors from the
//! write are returned unchanged.

use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::locator::DnsInfoProvider;
use crate::traits::{ChangeRecord, DnsClient, RecordEditor, RecordLocator, RecordType};
use crate::validation::{address_string, fqdn, is_valid_domain, is_valid_subdomain};

/// Record editor backed by a DNS client and a record locator
#[derive(Clone)]
pub struct DnsEditor {
    client: Arc<dyn DnsClient>,
    locator: Arc<dyn RecordLocator>,
}

impl DnsEditor {
    /// Create an editor from a client and the locator used for lookups
    pub fn new(client: Arc<dyn DnsClient>, locator: Arc<dyn RecordLocator>) -> Self {
        Self { client, locator }
    }

    /// Create an editor whose lookups go through a [`DnsInfoProvider`]
    /// on the same client
    pub fn with_client(client: Arc<dyn DnsClient>) -> Self {
        let locator = Arc::new(DnsInfoProvider::new(Arc::clone(&client)));
        Self::new(client, locator)
    }
}

impl std::fmt::Debug for DnsEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsEditor")
            .field("client", &self.client.provider_name())
            .finish()
    }
}

fn validate_names(domain: &str, subdomain: &str) -> Result<()> {
    if !is_valid_domain(domain) {
        return Err(Error::invalid_input(format!(
            "The domain name is invalid: {domain:?}"
        )));
    }

    if !is_valid_subdomain(subdomain) {
        return Err(Error::invalid_input(format!(
            "The subdomain name is invalid: {subdomain:?}"
        )));
    }

    Ok(())
}

fn require_ip(ip: Option<IpAddr>) -> Result<IpAddr> {
    ip.ok_or_else(|| Error::invalid_input("No IP address supplied"))
}

#[async_trait]
impl RecordEditor for DnsEditor {
    async fn create_subdomain(
        &self,
        domain: &str,
        subdomain: &str,
        ttl: u32,
        ip: Option<IpAddr>,
    ) -> Result<()> {
        validate_names(domain, subdomain)?;
        let ip = require_ip(ip)?;

        let record_type = RecordType::for_ip(ip);
        let name = fqdn(subdomain, domain);

        match self
            .locator
            .get_subdomain_record(domain, subdomain, record_type)
            .await
        {
            Ok(existing) => {
                return Err(Error::already_exists(format!(
                    "{} record for {} (id {}, content {})",
                    record_type, name, existing.id, existing.content
                )));
            }
            Err(e) if e.is_not_found() => {
                debug!("No {} record for {} yet, creating it", record_type, name);
            }
            Err(e) => return Err(e),
        }

        let change = ChangeRecord {
            name: subdomain.to_string(),
            value: address_string(ip),
            record_type: record_type.to_string(),
            ttl: ttl.to_string(),
        };

        let record_id = self.client.create_record(domain, &change).await?;

        info!(
            "Created {} record {} -> {} (ttl {}, id {})",
            record_type, name, change.value, ttl, record_id
        );
        Ok(())
    }

    async fn update_subdomain(
        &self,
        domain: &str,
        subdomain: &str,
        ip: Option<IpAddr>,
    ) -> Result<()> {
        validate_names(domain, subdomain)?;
        let ip = require_ip(ip)?;

        let record_type = RecordType::for_ip(ip);
        let existing = self
            .locator
            .get_subdomain_record(domain, subdomain, record_type)
            .await?;

        let new_value = address_string(ip);
        if existing.content == new_value {
            debug!(
                "{} record {} already points at {}",
                record_type,
                fqdn(subdomain, domain),
                new_value
            );
            return Err(Error::no_update_required(existing.content));
        }

        // Only the value changes; name, type and TTL come from the existing record.
        let change = ChangeRecord {
            name: existing.name.clone(),
            value: new_value,
            record_type: existing.record_type.clone(),
            ttl: existing.ttl.to_string(),
        };

        self.client
            .update_record(domain, existing.id, &change)
            .await?;

        info!(
            "Updated {} record {} -> {} (was: {})",
            record_type,
            fqdn(subdomain, domain),
            change.value,
            existing.content
        );
        Ok(())
    }

    async fn delete_subdomain(&self, domain: &str, subdomain: &str, record_type: &str) -> Result<()> {
        validate_names(domain, subdomain)?;
        let record_type: RecordType = record_type.parse()?;

        let existing = self
            .locator
            .get_subdomain_record(domain, subdomain, record_type)
            .await?;

        self.client.delete_record(domain, existing.id).await?;

        info!(
            "Deleted {} record {} (id {})",
            record_type,
            fqdn(subdomain, domain),
            existing.id
        );
        Ok(())
    }
}
