use tracing_subscriber::EnvFilter;

/// Installs the global subscriber once for the entire application.
///
/// Honors `RUST_LOG` when set, defaulting to `info`. Safe to call from
/// tests; a second install attempt is silently ignored.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
