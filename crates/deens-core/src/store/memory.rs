// # Memory Credential Store
//
// In-memory implementation of CredentialStore.
//
// ## Purpose
//
// Holds credentials for the lifetime of the process only. Useful for tests
// and for one-shot runs where credentials come from the environment.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::credentials::ApiCredentials;
use crate::traits::credential_store::CredentialStore;

/// In-memory credential store implementation
///
/// # Example
///
/// ```rust,no_run
/// use deens_core::credentials::ApiCredentials;
/// use deens_core::store::MemoryCredentialStore;
/// use deens_core::traits::CredentialStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryCredentialStore::new();
///
///     store
///         .save_credentials(&ApiCredentials::new("john.doe@example.com", "ApItOken")?)
///         .await?;
///
///     assert!(store.get_credentials().await?.is_some());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    inner: Arc<RwLock<Option<ApiCredentials>>>,
}

impl MemoryCredentialStore {
    /// Create a new empty memory credential store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds the given credentials
    pub fn with_credentials(credentials: ApiCredentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(credentials))),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get_credentials(&self) -> Result<Option<ApiCredentials>, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn save_credentials(&self, credentials: &ApiCredentials) -> Result<(), Error> {
        *self.inner.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn delete_credentials(&self) -> Result<(), Error> {
        self.inner.write().await.take();
        Ok(())
    }
}
