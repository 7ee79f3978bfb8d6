//! Logging setup. Reports go to stdout; log lines go to stderr.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then the config file.
pub fn init_logging(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
