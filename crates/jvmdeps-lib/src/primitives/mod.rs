//! jvmdeps primitives - core types, errors, and coordination
//!
//! Central collection of shared types that form the foundation of jvmdeps.
//! Logging and configuration enums live here next to the JVM domain types
//! that every other module passes around.

use clap::ValueEnum;
use std::str::FromStr;
use thiserror::Error;

/// JVM build-graph domain types
pub mod jvm;
pub use jvm::*;

/// Available log output streams
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// STDERR
    Stderr,
    /// STDOUT
    Stdout,
}

/// Log levels for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// Output formats for structured logging
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// TEXT
    /// alias: text, txt, plain
    Text,

    /// JSON
    /// alias: json
    Json,

    /// YAML-ish pretty output
    /// alias: yaml, yml, pretty
    Yaml,
}

/// Color output intent, resolved against the terminal at logger init
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntent {
    Auto,
    Always,
    Never,
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Logger configuration derived from application config
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub color: ColorIntent,
}

impl LoggerConfig {
    /// Whether ANSI escapes should be written to the selected stream
    pub fn use_ansi(&self) -> bool {
        match (self.format, self.color) {
            (LogFormat::Json, _) => false,
            (_, ColorIntent::Always) => true,
            (_, ColorIntent::Never) => false,
            (_, ColorIntent::Auto) => match self.output {
                LogOutput::Stderr => console::colors_enabled_stderr(),
                LogOutput::Stdout => console::colors_enabled(),
            },
        }
    }
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid working directory: {path}")]
    InvalidWorkDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },
}

/// Logger initialization errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl ValueEnum for LogFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Text, Self::Json, Self::Yaml]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Text => Some(
                clap::builder::PossibleValue::new("text")
                    .alias("txt")
                    .alias("plain"),
            ),
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Yaml => Some(
                clap::builder::PossibleValue::new("yaml")
                    .alias("yml")
                    .alias("pretty"),
            ),
        }
    }
}

fn parse_value_enum<T: ValueEnum>(s: &str, reason: &str) -> Result<T, ConfigError> {
    <T as ValueEnum>::from_str(s, true).map_err(|_| ConfigError::ParseError {
        value: s.to_string(),
        reason: reason.to_string(),
    })
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value_enum(s, "invalid log format")
    }
}

impl FromStr for LogOutput {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value_enum(s, "invalid log output stream")
    }
}

impl FromStr for ColorIntent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value_enum(s, "invalid color intent")
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
