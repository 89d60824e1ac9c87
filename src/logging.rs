use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Honors `RUST_LOG`; defaults to `warn` so script output stays readable.
/// Logs go to stderr, stdout is reserved for script output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
