// # deens-core
//
// Core library for managing DNS address records of subdomains.
//
// ## Architecture Overview
//
// - **DnsClient**: Trait for the DNS provider's record API
// - **RecordLocator** / `DnsInfoProvider`: Read path, finds domains and
//   subdomain records by listing and filtering
// - **RecordEditor** / `DnsEditor`: Write path, creates, updates and deletes
//   A/AAAA records after checking the current state
// - **CredentialStore**: Persists API credentials between runs
// - **ClientRegistry**: Plugin-based registry for DNS client factories
//
// ## Design Principles
//
// 1. **Lookup before mutate**: every write is preceded by a fresh lookup
// 2. **One seam**: the provider is consumed only through `DnsClient`
// 3. **No hidden state**: nothing is cached between operations
// 4. **Explicit outcomes**: "nothing to do" is an error the caller can match on

pub mod config;
pub mod credentials;
pub mod editor;
pub mod error;
pub mod locator;
pub mod registry;
pub mod store;
pub mod traits;
pub mod validation;

// Re-export core types for convenience
pub use config::{CredentialStoreConfig, DeensConfig, EditorConfig, ProviderConfig};
pub use credentials::ApiCredentials;
pub use editor::DnsEditor;
pub use error::{Error, Result};
pub use locator::DnsInfoProvider;
pub use registry::ClientRegistry;
pub use store::{FileCredentialStore, MemoryCredentialStore};
pub use traits::{
    ChangeRecord, CredentialStore, DnsClient, DnsClientFactory, Domain, Record, RecordEditor,
    RecordLocator, RecordType,
};
