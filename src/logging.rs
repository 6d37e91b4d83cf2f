use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` events to the browser console.
///
/// Timestamps are disabled because `SystemTime` is unavailable on
/// `wasm32-unknown-unknown`; the console stamps entries itself.
///
/// # Errors
/// Returns an error if the filter is invalid or a global subscriber is already set.
pub fn setup_logging(filter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter_layer = EnvFilter::try_new(filter)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(MakeWebConsoleWriter::new())
                .with_ansi(false)
                .without_time(),
        )
        .with(filter_layer)
        .try_init()?;

    tracing::info!("Logging initialized with filter {filter:?}");

    Ok(())
}
