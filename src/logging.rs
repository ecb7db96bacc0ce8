use tracing_subscriber::EnvFilter;

/// Install a stderr log subscriber.
///
/// Records emitted through the `log` facade by the library are forwarded to it.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_filter = if verbose {
        "info,vast_inspector=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
