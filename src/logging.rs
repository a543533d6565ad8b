// src/logging.rs

//! Diagnostics go to stderr through a `tracing-subscriber` fmt layer;
//! stdout is left to task reports and the graph listing.
//!
//! The filter is chosen once at startup:
//! - `--log-level` wins and applies to every target;
//! - otherwise `TASKDAG_LOG` is read as an `EnvFilter` directive string,
//!   so both `debug` and `taskdag::dag=trace,info` work;
//! - an unset or unparsable variable falls back to `info`.

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "TASKDAG_LOG";

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directives = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, directives.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

/// Resolve the filter from the CLI flag and the raw `TASKDAG_LOG` value.
pub fn build_filter(cli_level: Option<LogLevel>, directives: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return level_only(LevelFilter::from(level));
    }

    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| {
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse(d)
                .ok()
        })
        .unwrap_or_else(|| level_only(LevelFilter::INFO))
}

fn level_only(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy("")
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}
