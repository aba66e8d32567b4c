use crate::primitives::*;
use std::sync::OnceLock;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        // Progress bars for spans created with `progress_span!`
        let indicatif_layer = IndicatifLayer::new();

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| Self::default_filter(config.level));

        let ansi = config.use_ansi();
        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(ansi)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_ansi(ansi)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(ansi)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Yaml) => fmt::layer()
                .with_writer(indicatif_layer.get_stdout_writer())
                .with_ansi(ansi)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        GLOBAL_LOGGER
            .set(Logger {
                level: config.level,
            })
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            ansi,
            "Logger initialized"
        );

        GLOBAL_LOGGER.get().ok_or(LoggerError::AlreadyInitialized)
    }

    /// Filter used when `RUST_LOG` is unset: our crates at the configured
    /// level, everything else silenced
    pub fn default_filter(level: LogLevel) -> EnvFilter {
        let level = level.as_filter_directive();
        EnvFilter::new(format!("jvmdeps_lib={level},jvmdeps={level}"))
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }
}

/// Create a span for operations that should show progress bars
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!("progress", operation = $operation)
    };
    ($operation:expr, total = $total:expr) => {
        tracing::info_span!("progress", operation = $operation, total = $total)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
