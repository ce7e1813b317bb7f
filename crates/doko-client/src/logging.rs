use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Diagnostics go to stderr so stdout
/// stays free for protocol frames.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
