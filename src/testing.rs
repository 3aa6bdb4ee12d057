//! Helpers for tests that launch or configure Ignition gateways.
//!
//! ```rust,no_run
//! use testcontainers_ignition::testing;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     testing::init_tracing();
//!     let dir = tempfile::tempdir().unwrap();
//!     let backup = testing::fixture_file(dir.path(), "gateway.gwbk");
//!     // hand `backup` to `LaunchConfiguration::with_gateway_backup`
//! }
//! ```

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "testcontainers_ignition=debug";

/// Install a fmt subscriber for test output. Safe to call from every test.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Create an empty placeholder file named `name` inside `dir`.
///
/// Path validation only checks existence, so the content does not matter for
/// configuration tests. Panics if the file cannot be written.
pub fn fixture_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"").expect("failed to create fixture file");
    path
}
