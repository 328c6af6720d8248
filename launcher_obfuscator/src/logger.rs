use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the JSON subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .json();

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // a subscriber may already be installed by an embedding program
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
