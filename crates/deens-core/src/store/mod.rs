// # Credential Store Implementations
//
// This module provides implementations of the CredentialStore trait for
// different persistence strategies.

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::config::CredentialStoreConfig;
use crate::error::Result;
use crate::traits::CredentialStore;

/// Open the credential store described by the configuration
pub async fn open(config: &CredentialStoreConfig) -> Result<Box<dyn CredentialStore>> {
    match config {
        CredentialStoreConfig::File { path } => {
            tracing::debug!("Opening credential file {}", path.display());
            Ok(Box::new(FileCredentialStore::new(path).await?))
        }
        CredentialStoreConfig::Memory => Ok(Box::new(MemoryCredentialStore::new())),
    }
}
