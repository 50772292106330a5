//! Error types for deens
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for deens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for deens
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input (domain, subdomain, IP, record type or credentials)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No record matched a lookup
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A matching address record is already present
    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    /// The record already points at the requested address
    #[error("No update required. IP address did not change ({current})")]
    NoUpdateRequired {
        /// The address currently stored in the record
        current: String,
    },

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// HTTP transport errors (from provider APIs)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential store errors
    #[error("Credential store error: {0}")]
    CredentialStore(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an "already exists" error
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    /// Create a "no update required" error
    pub fn no_update_required(current: impl Into<String>) -> Self {
        Self::NoUpdateRequired {
            current: current.into(),
        }
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a credential store error
    pub fn credential_store(msg: impl Into<String>) -> Self {
        Self::CredentialStore(msg.into())
    }

    /// True for errors raised before any provider call because the
    /// caller supplied bad input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// True when a lookup found no matching record
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for the create/update preconditions that refuse to touch the record
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyExists(_) | Self::NoUpdateRequired { .. })
    }

    /// True for failures reported by the DNS provider or its transport
    pub fn is_provider(&self) -> bool {
        matches!(
            self,
            Self::Provider { .. } | Self::Http(_) | Self::Authentication(_) | Self::RateLimited(_)
        )
    }
}
