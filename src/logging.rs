use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the diagnostic subscriber.
///
/// Diagnostics go to stderr and are off unless `RUST_LOG` asks for them, since anything
/// printed while the bars are live lands in the middle of the display.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    // Ignore a second initialisation, e.g. from tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_names(true)
                .with_writer(std::io::stderr),
        )
        .try_init();
}
