//! Structured logging setup
//!
//! Human-readable or JSON log lines on stderr, so command output on stdout
//! stays clean. `RUST_LOG` takes precedence over the `--verbose` default.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "blogcast=debug"
    } else {
        "blogcast=info"
    }
}

/// Initialize the global subscriber
///
/// # Arguments
///
/// * `verbose` - Log at debug level instead of info
/// * `json` - Emit one JSON object per line
///
/// # Errors
///
/// Returns error if a global subscriber is already set
pub fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    }

    Ok(())
}
