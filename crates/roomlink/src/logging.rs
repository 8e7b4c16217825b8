//! Tracing setup for applications using Roomlink.
//!
//! The library itself only emits `tracing` events. Applications that
//! don't bring their own subscriber can install one with
//! [`init_tracing`]:
//!
//! ```ignore
//! use roomlink::{TracingConfig, init_tracing};
//!
//! init_tracing(TracingConfig::default())?;
//! ```
//!
//! `RUST_LOG` takes precedence over the configured default level.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line output.
    #[default]
    Compact,
    /// Multi-line, human-oriented output.
    Pretty,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for the `roomlink` crates when `RUST_LOG` is unset.
    pub default_level: Level,
    pub format: LogFormat,
    /// Include the module path in each line.
    pub include_target: bool,
    /// Explicit filter directive; overrides both `RUST_LOG` and
    /// `default_level`.
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            format: LogFormat::Compact,
            include_target: true,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn filter(&self) -> Result<EnvFilter, TracingError> {
        match &self.env_filter {
            Some(directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(
                    [
                        "roomlink",
                        "roomlink_transport",
                        "roomlink_protocol",
                        "roomlink_net",
                        "roomlink_rpc",
                        "roomlink_room",
                    ]
                    .map(|target| format!("{target}={}", self.default_level))
                    .join(","),
                )
            })),
        }
    }
}

/// Installs a global subscriber built from `config`.
///
/// # Errors
///
/// Fails if a global subscriber is already set or the filter directive
/// is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;

    match config.format {
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_target(config.include_target));
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty().with_target(config.include_target));
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
