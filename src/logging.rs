//! Diagnostic logging for fintrack
//!
//! tracing-based logging to stderr. The audit trail of data changes is
//! separate (see `audit`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "fintrack=warn";
const VERBOSE_FILTER: &str = "fintrack=debug";

/// Initialize the logging system
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `verbose`.
pub fn init(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

/// Initialize logging for tests
///
/// Uses try_init() so it can be called from every test.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("fintrack=debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
