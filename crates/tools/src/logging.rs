use std::env;
use std::io;

/// Installs a `fmt` subscriber writing to stderr. `log_filter` takes precedence over
/// `RUST_LOG`; with neither set, `info` and above are shown.
pub fn setup_logging(log_filter: Option<String>) {
    let filter = log_filter
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt().with_writer(io::stderr).with_env_filter(filter).init();
}
