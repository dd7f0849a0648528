//! Client configuration.
//!
//! [`ClientConfig`] holds everything fixed at client construction: the server
//! URL, credentials, and optional end-to-end encryption settings. It derives
//! `Deserialize` with every field defaulted, so callers can load it from any
//! serde format; the SDK itself reads no files or environment variables.

use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// Server used when none is configured (a local sandbox).
pub const DEFAULT_SERVER: &str = "http://localhost:8000/";

/// Settings for encrypted requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Location of the client's private key set.
    #[serde(alias = "clientPrivateKeySetLocation")]
    pub client_private_key_set_location: String,

    /// Location of the server's public key set.
    #[serde(alias = "keySetLocation")]
    pub key_set_location: String,
}

/// Construction-time options for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "programToken")]
    pub program_token: Option<String>,
    pub server: String,
    /// Enables end-to-end encryption when present.
    #[serde(alias = "encryptionData")]
    pub encryption_data: Option<EncryptionConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            program_token: None,
            server: DEFAULT_SERVER.to_string(),
            encryption_data: None,
        }
    }
}

impl ClientConfig {
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_program_token(mut self, token: impl Into<String>) -> Self {
        self.program_token = Some(token.into());
        self
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_encryption(mut self, encryption: EncryptionConfig) -> Self {
        self.encryption_data = Some(encryption);
        self
    }

    /// Checks the settings that can be checked without touching the network or
    /// filesystem.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.server.trim().is_empty() {
            return Err(config_error("server URL is empty"));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(config_error("password given without a username"));
        }
        if let Some(encryption) = &self.encryption_data {
            if encryption.client_private_key_set_location.is_empty() {
                return Err(config_error("encryption private key set location is empty"));
            }
            if encryption.key_set_location.is_empty() {
                return Err(config_error("encryption key set location is empty"));
            }
        }
        Ok(())
    }
}

fn config_error(message: &str) -> RegistryError {
    RegistryError::ConfigurationError {
        message: message.to_string(),
    }
}
