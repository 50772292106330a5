//! API credentials
//!
//! An e-mail address and API token pair. Both must be non-blank; the check
//! runs on construction and on deserialization, before any network call.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation::is_blank;

/// Credentials for accessing the provider API
///
/// # Security
///
/// The Debug implementation does NOT expose the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct ApiCredentials {
    email: String,
    /// ⚠️ NEVER log this value
    token: String,
}

#[derive(Deserialize)]
struct RawCredentials {
    email: String,
    token: String,
}

impl TryFrom<RawCredentials> for ApiCredentials {
    type Error = Error;

    fn try_from(raw: RawCredentials) -> Result<Self> {
        Self::new(raw.email, raw.token)
    }
}

impl ApiCredentials {
    /// Create credentials from an e-mail address and an API token
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either value is blank.
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let email = email.into();
        let token = token.into();

        if is_blank(&email) {
            return Err(Error::invalid_input("No e-mail address given"));
        }

        if is_blank(&token) {
            return Err(Error::invalid_input("No API token given"));
        }

        Ok(Self { email, token })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("email", &self.email)
            .field("token", &"<REDACTED>")
            .finish()
    }
}
