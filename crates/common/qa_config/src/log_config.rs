/// Initialize a `tracing_subscriber`
///
/// Reports all the log events sent with the `tracing` crate,
/// up to the given level.
pub fn set_log_level(log_level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .with_max_level(log_level)
        .init();
}

/// `--debug` wins over the level configured in `qa.toml`.
pub fn effective_log_level(debug: bool, configured: tracing::Level) -> tracing::Level {
    if debug {
        tracing::Level::DEBUG
    } else {
        configured
    }
}
