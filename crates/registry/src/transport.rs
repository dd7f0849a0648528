//! The transport port.
//!
//! The client facade speaks to the registry server only through [`Transport`].
//! The `transport` crate supplies the HTTP implementation; tests supply
//! in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::TransportError;

/// Authenticated JSON requests against relative registry paths.
///
/// Paths come from [`crate::paths::build_path`] and never carry a scheme or
/// host. Implementations apply their credentials to every request and surface
/// failures without retrying.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET path`, returning the decoded response body.
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    /// `POST path` with a JSON body, returning the decoded response body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    /// `DELETE path`, returning the decoded response body.
    async fn delete(&self, path: &str) -> Result<Value, TransportError>;
}
