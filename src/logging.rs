//! Tracing subscriber setup.

use std::io::IsTerminal;

use anyhow::anyhow;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "CALGRID_LOG";

/// Install the global fmt subscriber.
///
/// `level` is any `EnvFilter` directive (`info`, `calgrid_core=debug`, ...);
/// `CALGRID_LOG` takes precedence when set. Calling this again after a
/// subscriber is installed is a no-op.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("invalid {LOG_ENV_VAR} / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
