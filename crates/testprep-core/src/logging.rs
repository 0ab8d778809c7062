//! Logging initialization
//!
//! Sets up a `tracing` subscriber writing to stderr. `RUST_LOG` takes
//! precedence; otherwise the verbosity count picks the level for this
//! crate's targets while everything else stays at `warn`.
//!
//! ```ignore
//! use testprep_core::logging::{init_logging, LoggingConfig};
//!
//! init_logging(LoggingConfig::from_verbosity(1))?;
//! tracing::debug!("visible with -v");
//! ```

use anyhow::Result;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Targets that follow the configured level
const OWN_TARGETS: &[&str] = &["testprep", "testprep_core"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's targets
    pub level: Level,

    /// Include the module target in each line
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Map a `-v` count to a level: 0 = info, 1 = debug, 2+ = trace
    pub fn from_verbosity(verbose: u8) -> Self {
        let level = match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            include_target: verbose > 0,
        }
    }

    /// Filter directives used when `RUST_LOG` is not set
    pub fn directives(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        let mut directives = vec!["warn".to_string()];
        directives.extend(OWN_TARGETS.iter().map(|target| format!("{}={}", target, level)));
        directives.join(",")
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.directives()));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .without_time();

        result = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e));
    });

    result
}
