// # Credential Store Trait
//
// Defines the interface for persisting API credentials between runs.
//
// ## Implementations
//
// - Memory: `MemoryCredentialStore` (tests, one-shot runs)
// - File: `FileCredentialStore` (JSON file with atomic writes)
//
// ## Usage
//
// ```rust,ignore
// use deens_core::{ApiCredentials, CredentialStore};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = /* CredentialStore implementation */;
//
//     store.save_credentials(&ApiCredentials::new("john.doe@example.com", "token")?).await?;
//     let credentials = store.get_credentials().await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::credentials::ApiCredentials;

/// Trait for credential store implementations
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks.
///
/// ## Implementation Guidelines
///
/// - **Async I/O only**: Use async file operations, never blocking I/O
/// - **Durable writes**: `save_credentials` returns only after the
///   credentials are persisted
/// - **No logging of secrets**: the token must never reach a log line
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Get the stored credentials
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ApiCredentials))`: The stored credentials
    /// - `Ok(None)`: Nothing stored
    /// - `Err(Error)`: Storage error
    async fn get_credentials(&self) -> Result<Option<ApiCredentials>, crate::Error>;

    /// Store the given credentials, replacing any previous ones
    async fn save_credentials(&self, credentials: &ApiCredentials) -> Result<(), crate::Error>;

    /// Remove stored credentials
    ///
    /// Succeeds if nothing was stored.
    async fn delete_credentials(&self) -> Result<(), crate::Error>;
}
