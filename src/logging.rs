use tracing_subscriber::EnvFilter;

/// Set up the tracing subscriber for the extension. The panel logs at
/// `info`; enabling `debug_logging` in the settings file drops the filter
/// to `debug` and lets `RUST_LOG` take over entirely.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        // Pin the filter to `info` so a stray `RUST_LOG` in the host
        // environment cannot turn on verbose output behind the user's back.
        EnvFilter::new("info")
    };

    // `try_init` so re-initialisation (tests, host reloads) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
