//! Optional tracing subscriber for applications using the SDK.
//!
//! Libraries should not install subscribers behind the caller's back, so none
//! of the SDK's operations call this. Applications without their own
//! `tracing` setup can call [`init`] once at startup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global JSON subscriber filtered by `RUST_LOG`.
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(true))
        .try_init()
}

/// Like [`try_init`], but leaves an existing global subscriber in place.
pub fn init() {
    if try_init().is_err() {
        tracing::debug!("Global tracing subscriber already installed; keeping it");
    }
}
