use tracing_subscriber::EnvFilter;

/// Send diagnostics to stderr; stdout carries only the status line.
/// Verbosity comes from RUST_LOG, defaulting to warnings.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
