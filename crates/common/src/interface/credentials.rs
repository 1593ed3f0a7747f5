use std::fmt;

use crate::PinError;

/// A Pinata API key pair.
///
/// Constructed once when the process starts and handed to the client; never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Creates a new key pair, rejecting empty or whitespace-only values.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self, PinError> {
        let api_key = api_key.into().trim().to_string();
        let api_secret = api_secret.into().trim().to_string();

        if api_key.is_empty() {
            return Err(PinError::Configuration("PINATA_API_KEY is empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(PinError::Configuration("PINATA_API_SECRET is empty".to_string()));
        }

        Ok(Self { api_key, api_secret })
    }

    /// The public API key, sent as `pinata_api_key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The secret API key, sent as `pinata_secret_api_key`.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
