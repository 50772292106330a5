//! Core traits for deens
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DnsClient`]: Talk to the DNS provider's record API
//! - [`RecordLocator`]: Resolve subdomain records (read path)
//! - [`RecordEditor`]: Create, update and delete subdomain records (write path)
//! - [`CredentialStore`]: Persist API credentials between runs

pub mod credential_store;
pub mod dns_client;
pub mod record_editor;
pub mod record_locator;

pub use credential_store::CredentialStore;
pub use dns_client::{ChangeRecord, DnsClient, DnsClientFactory, Domain, Record, RecordType};
pub use record_editor::RecordEditor;
pub use record_locator::RecordLocator;
