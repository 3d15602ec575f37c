use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Noisy dependencies are held at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &str = "sqlx=warn,hyper=warn";

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{default_level},{QUIET_TARGETS}")))
        .map_err(|e| anyhow!("invalid log level '{default_level}': {e}"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}
