//! Tracing initialisation for tests.
//!
//! Classification and catalog fallbacks log at `debug`, so the default filter
//! shows advisor internals while keeping dependencies (reqwest, hyper) quiet.
//! `RUST_LOG` overrides it. Initialisation happens at most once per process.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,glowtech_core=debug";

/// Route tracing output to the test-harness writer.
///
/// ```ignore
/// #[tokio::test]
/// async fn my_test() {
///     glowtech_test_utils::tracing_setup::init_test_tracing();
///     // ... advisor debug events are captured per test
/// }
/// ```
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
