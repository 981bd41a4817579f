#![cfg(test)]
pub use rstest::*;

/// Install the test log subscriber, once per test binary. `RUST_LOG` picks
/// the level.
pub fn init_tracing() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
