//! Diagnostic logging.
//!
//! Stdout belongs to the wizard's prompts, so logs go to stderr. Verbosity
//! comes from `README_WIZARD_LOG` (an `EnvFilter` directive) and defaults to
//! `warn`, which keeps an interactive session quiet.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "README_WIZARD_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter from `README_WIZARD_LOG`, or the default when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        tracing::debug!("logging initialised");
    }
}
