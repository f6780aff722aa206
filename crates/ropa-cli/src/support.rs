use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Route `tracing` events to stderr, filtered by `RUST_LOG`.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print `error: <message>` and terminate with `code`.
pub fn exit_with(err: impl std::fmt::Display, code: i32) -> ! {
    tracing::debug!(code, "aborting");
    eprintln!("error: {err}");
    std::process::exit(code);
}
