// # DNS Client Trait
//
// Defines the interface to a DNS provider's record API.
//
// ## Implementations
//
// - DNSimple: `deens-provider-dnsimple` crate
//
// ## Usage
//
// ```rust,ignore
// use deens_core::DnsClient;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let client = /* DnsClient implementation */;
//
//     for record in client.list_records("example.com").await? {
//         println!("{} {} {}", record.name, record.record_type, record.content);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// A domain managed by the provider account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Provider-assigned identifier
    #[serde(default)]
    pub id: u64,
    /// Domain name (e.g., "example.com")
    pub name: String,
}

/// A DNS record as returned by the provider
///
/// Records are never cached; every operation fetches them again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier
    pub id: u64,
    /// Subdomain label ("" for the bare domain)
    #[serde(default)]
    pub name: String,
    /// Record content (the address for A/AAAA records)
    #[serde(default)]
    pub content: String,
    /// Record type as reported by the provider ("A", "AAAA", "MX", ...)
    #[serde(default)]
    pub record_type: String,
    /// Time-to-live in seconds
    #[serde(default)]
    pub ttl: u32,
}

/// Write payload for create and update calls
///
/// Assembled right before the call and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub name: String,
    #[serde(rename = "content")]
    pub value: String,
    pub record_type: String,
    pub ttl: String,
}

/// Address record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[serde(rename = "A")]
    A,
    /// AAAA record (IPv6)
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// Derive the record type from an address family
    ///
    /// IPv4-mapped IPv6 addresses are treated as IPv4.
    pub fn for_ip(ip: IpAddr) -> Self {
        match ip.to_canonical() {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::Aaaa,
        }
    }

    /// The record type as the provider spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::Error;

    /// Only the exact spellings "A" and "AAAA" are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            other => Err(crate::Error::invalid_input(format!(
                "The given record type is invalid: {other:?}"
            ))),
        }
    }
}

/// Trait for DNS provider clients
///
/// The client is a thin gateway to the provider's API. It executes exactly
/// one API call per invocation and returns provider failures as errors;
/// deciding whether a call is needed is the job of the record editor.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off on failures
/// - ❌ Cache responses beyond a single request
/// - ❌ Spawn tasks or threads
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// List all domains of the account, in provider order
    async fn list_domains(&self) -> Result<Vec<Domain>, crate::Error>;

    /// List all DNS records of a domain, in provider order
    ///
    /// # Parameters
    ///
    /// - `domain`: The domain name (e.g., "example.com")
    async fn list_records(&self, domain: &str) -> Result<Vec<Record>, crate::Error>;

    /// Create a record
    ///
    /// # Returns
    ///
    /// - `Ok(u64)`: The identifier of the created record
    /// - `Err(Error)`: If the provider rejected the request
    async fn create_record(&self, domain: &str, change: &ChangeRecord)
    -> Result<u64, crate::Error>;

    /// Replace the record with the given identifier
    ///
    /// # Returns
    ///
    /// - `Ok(u64)`: The identifier of the updated record
    /// - `Err(Error)`: If the provider rejected the request
    async fn update_record(
        &self,
        domain: &str,
        record_id: u64,
        change: &ChangeRecord,
    ) -> Result<u64, crate::Error>;

    /// Delete the record with the given identifier
    async fn delete_record(&self, domain: &str, record_id: u64) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing DNS clients from configuration
pub trait DnsClientFactory: Send + Sync {
    /// Create a DnsClient instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Configuration specific to this provider
    ///
    /// # Returns
    ///
    /// A boxed DnsClient trait object
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn DnsClient>, crate::Error>;
}
