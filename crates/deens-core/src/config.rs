//! Configuration types for deens
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::validation::is_blank;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeensConfig {
    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// Where credentials are kept between runs
    #[serde(default)]
    pub credential_store: CredentialStoreConfig,

    /// Optional editor settings
    #[serde(default)]
    pub editor: EditorConfig,
}

impl DeensConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.provider.validate()?;
        self.credential_store.validate()?;
        self.editor.validate()?;

        Ok(())
    }
}

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// DNSimple provider
    Dnsimple {
        /// Account e-mail address
        email: String,
        /// DNSimple API token
        token: String,
        /// API base URL (optional, defaults to the public v1 endpoint)
        #[serde(default)]
        base_url: Option<String>,
        /// Perform reads but only log writes
        #[serde(default)]
        dry_run: bool,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Dnsimple {
                email,
                token,
                base_url,
                ..
            } => {
                if is_blank(email) {
                    return Err(crate::Error::config("DNSimple e-mail address cannot be empty"));
                }
                if is_blank(token) {
                    return Err(crate::Error::config("DNSimple API token cannot be empty"));
                }
                if let Some(url) = base_url
                    && !url.starts_with("https://")
                    && !url.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "DNSimple API URL must use HTTP or HTTPS scheme. Got: {url}"
                    )));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Dnsimple { .. } => "dnsimple",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Dnsimple {
            email: String::new(),
            token: String::new(),
            base_url: None,
            dry_run: false,
        }
    }
}

// Keeps the token out of logs and panic messages.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Dnsimple {
                email,
                base_url,
                dry_run,
                ..
            } => f
                .debug_struct("Dnsimple")
                .field("email", email)
                .field("token", &"<REDACTED>")
                .field("base_url", base_url)
                .field("dry_run", dry_run)
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .finish_non_exhaustive(),
        }
    }
}

/// Credential store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialStoreConfig {
    /// JSON file
    File {
        /// Path to the credential file
        path: PathBuf,
    },

    /// In-memory store (not persistent)
    #[default]
    Memory,
}

impl CredentialStoreConfig {
    /// Validate the credential store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            CredentialStoreConfig::File { path } if path.as_os_str().is_empty() => Err(
                crate::Error::config("Credential file path cannot be empty"),
            ),
            _ => Ok(()),
        }
    }
}

/// Record editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// TTL in seconds for records created without an explicit TTL
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

impl EditorConfig {
    /// Validate the editor configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.default_ttl == 0 {
            return Err(crate::Error::config("Default TTL must be > 0"));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
        }
    }
}

fn default_ttl() -> u32 {
    600
}
