//! Plugin-based client registry
//!
//! The registry allows DNS client implementations to be registered at
//! runtime, avoiding hardcoded if-else chains over provider names.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use deens_core::ClientRegistry;
//! use deens_core::config::ProviderConfig;
//!
//! let registry = ClientRegistry::new();
//! deens_provider_dnsimple::register(&registry);
//!
//! let config = ProviderConfig::Dnsimple { ... };
//! let client = registry.create_client(&config)?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{DnsClient, DnsClientFactory};

/// Registry of DNS client factories keyed by provider type name
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ClientRegistry {
    factories: RwLock<HashMap<String, Box<dyn DnsClientFactory>>>,
}

impl ClientRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DNS client factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider type name (e.g., "dnsimple")
    /// - `factory`: Factory object for creating client instances
    ///
    /// Registering a name twice replaces the earlier factory.
    pub fn register_factory(&self, name: impl Into<String>, factory: Box<dyn DnsClientFactory>) {
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        factories.insert(name.into(), factory);
    }

    /// Create a DNS client from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn DnsClient>)`: Created client instance
    /// - `Err(Error)`: If the provider type is not registered or creation fails
    pub fn create_client(&self, config: &ProviderConfig) -> Result<Box<dyn DnsClient>> {
        let provider_type = config.type_name();
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let factory = factories
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        tracing::debug!("Creating {} client", provider_type);
        factory.create(config)
    }

    /// List all registered provider types, sorted by name
    pub fn list_providers(&self) -> Vec<String> {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let factories = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        factories.contains_key(name)
    }
}
