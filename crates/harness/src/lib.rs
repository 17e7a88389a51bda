pub mod backend;
pub mod fixtures;

pub use backend::{SentWine, TestBackend};
pub use fixtures::{WineBuilder, cellar, date, grape};

/// Installs a compact fmt subscriber filtered by `RUST_LOG` (default `warn`).
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer().compact())
        .try_init()
        .ok();
}
