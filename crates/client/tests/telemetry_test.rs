//! Telemetry wiring tests. Kept in their own binary because the subscriber
//! is process-global.

use client::telemetry;

#[test]
fn test_second_install_is_rejected_and_init_tolerates_it() {
    assert!(telemetry::try_init().is_ok());
    assert!(telemetry::try_init().is_err());

    telemetry::init();
    tracing::info!(component = "telemetry_test", "subscriber installed");
}
