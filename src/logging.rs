//! `tracing` subscriber setup for the `docnav` binary.
//!
//! Logs go to stderr so stdout stays usable for the printed destinations.
//! `RUST_LOG` takes precedence over the `-v` count when set.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// 0 -> warn, 1 -> info, 2 -> debug, 3+ -> trace.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity >= 2,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_ascii_lowercase()))
    }
}

pub fn init_logging(config: &LogConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.with_target)
                .without_time(),
        )
        .try_init()
        .map_err(|e| anyhow!("initialize logging: {e}"))
}
