//! NTCore HTTP transport adapter.
//!
//! Implements [`registry::Transport`] over `reqwest`. The facade in the
//! `client` crate only ever sees the trait.
//!
//! ## Authentication
//!
//! Credentials are taken from [`registry::ClientConfig`] once, at
//! construction, and applied to every request:
//!
//! - `username` / `password` as HTTP basic auth (only when a username is set),
//! - `program_token` as the [`PROGRAM_TOKEN_HEADER`] header,
//! - when encryption is configured, the key-set location as the
//!   [`ENCRYPTION_KEY_SET_HEADER`] header.
//!
//! ## Failures
//!
//! Nothing is retried. A request that gets no response, a non-2xx status, and
//! an undecodable body each map to one [`TransportError`] variant and are
//! handed straight back to the caller.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP details stay in this crate.

use std::path::Path;

use async_trait::async_trait;
use registry::{ClientConfig, EncryptionConfig, RegistryError, Transport, TransportError};
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;
use tracing::{debug, warn};

/// Header carrying the program token.
pub const PROGRAM_TOKEN_HEADER: &str = "X-Program-Token";

/// Header announcing which key set end-to-end encrypted requests use.
pub const ENCRYPTION_KEY_SET_HEADER: &str = "X-Encryption-Key-Set";

/// [`Transport`] implementation backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    server: Url,
    username: Option<String>,
    password: Option<String>,
    program_token: Option<String>,
    encryption: Option<EncryptionConfig>,
}

impl HttpTransport {
    /// Creates a transport with a default `reqwest` client.
    pub fn new(config: &ClientConfig) -> Result<Self, RegistryError> {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a transport around a caller-built `reqwest` client (proxies,
    /// timeouts and TLS roots are configured there).
    pub fn with_client(config: &ClientConfig, http: reqwest::Client) -> Result<Self, RegistryError> {
        config.validate()?;

        let server = Url::parse(&config.server).map_err(|e| RegistryError::ConfigurationError {
            message: format!("invalid server URL '{}': {e}", config.server),
        })?;

        if let Some(encryption) = &config.encryption_data {
            check_key_set(&encryption.client_private_key_set_location)?;
            check_key_set(&encryption.key_set_location)?;
        }

        Ok(Self {
            http,
            server,
            username: config.username.clone(),
            password: config.password.clone(),
            program_token: config.program_token.clone(),
            encryption: config.encryption_data.clone(),
        })
    }

    /// The configured server URL.
    pub fn server(&self) -> &Url {
        &self.server
    }

    /// Absolute URL for a relative registry path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.server.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url_for(path));
        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, self.password.as_ref());
        }
        if let Some(token) = &self.program_token {
            builder = builder.header(PROGRAM_TOKEN_HEADER, token);
        }
        if let Some(encryption) = &self.encryption {
            builder = builder.header(ENCRYPTION_KEY_SET_HEADER, &encryption.key_set_location);
        }
        builder
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Value, TransportError> {
        debug!(%method, path, "Sending registry request");

        let response = builder.send().await.map_err(|e| TransportError::Request {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TransportError::Request {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "Registry request failed");
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.send(Method::GET, path, self.request(Method::GET, path)).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let builder = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path)).await
    }
}

fn check_key_set(location: &str) -> Result<(), RegistryError> {
    if Path::new(location).exists() {
        Ok(())
    } else {
        Err(RegistryError::ConfigurationError {
            message: format!("encryption key set not found at '{location}'"),
        })
    }
}
