use tracing_subscriber::EnvFilter;

/// Initialize diagnostic logging on stderr.
///
/// Verbosity maps 0 → warn, 1 (`-v`) → info, 2 (`-vv`) → debug, and 3+ →
/// trace.  `RUST_LOG` overrides it when set.
pub(crate) fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME"))));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
