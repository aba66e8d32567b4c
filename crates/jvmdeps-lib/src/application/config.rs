//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "1"; // Warnings surface malformed imports
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const SOURCE_TREE_PREFIX: &str = "src/jvm/";
    pub const OVERRIDES_FILE: &str = "3rdparty/jvm/thirdparty_map_overrides.json";
    pub const MAVEN_REPOSITORY: &str = "maven";
    pub const BAZEL: &str = "bazel";
    pub const VISIBILITY: &str = "//visibility:public";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap()
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap()
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap()
    }

    pub fn color() -> ColorIntent {
        defaults::COLOR.parse().unwrap()
    }

    pub fn source_tree_prefix() -> String {
        defaults::SOURCE_TREE_PREFIX.to_string()
    }

    pub fn overrides_file() -> PathBuf {
        PathBuf::from(defaults::OVERRIDES_FILE)
    }

    pub fn maven_repository() -> String {
        defaults::MAVEN_REPOSITORY.to_string()
    }

    pub fn bazel() -> String {
        defaults::BAZEL.to_string()
    }

    pub fn visibility() -> String {
        defaults::VISIBILITY.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Repository root (defaults to the current directory)
    #[arg(short, long, env = "JVMDEPS_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Filesystem prefix under which directories mirror Java packages
    #[arg(long, env = "JVMDEPS_SOURCE_TREE_PREFIX", default_value = defaults::SOURCE_TREE_PREFIX)]
    #[serde(default = "default_fns::source_tree_prefix")]
    pub source_tree_prefix: String,

    /// Third-party placement overrides, relative to the repository root
    #[arg(long, env = "JVMDEPS_OVERRIDES_FILE", default_value = defaults::OVERRIDES_FILE)]
    #[serde(default = "default_fns::overrides_file")]
    pub overrides_file: PathBuf,

    /// External repository holding the jvm_import targets
    #[arg(long, env = "JVMDEPS_MAVEN_REPOSITORY", default_value = defaults::MAVEN_REPOSITORY)]
    #[serde(default = "default_fns::maven_repository")]
    pub maven_repository: String,

    /// Bazel executable used for the metadata query
    #[arg(long, env = "JVMDEPS_BAZEL", default_value = defaults::BAZEL)]
    #[serde(default = "default_fns::bazel")]
    pub bazel: String,

    /// Pre-captured `bazel query --output=build` output; skips running bazel
    #[arg(long, env = "JVMDEPS_MAVEN_QUERY_OUTPUT")]
    #[serde(default)]
    pub maven_query_output: Option<PathBuf>,

    /// Visibility assigned to generated libraries
    #[arg(long, env = "JVMDEPS_VISIBILITY", default_value = defaults::VISIBILITY)]
    #[serde(default = "default_fns::visibility")]
    pub visibility: String,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "JVMDEPS_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "JVMDEPS_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "JVMDEPS_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "JVMDEPS_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            source_tree_prefix: default_fns::source_tree_prefix(),
            overrides_file: default_fns::overrides_file(),
            maven_repository: default_fns::maven_repository(),
            bazel: default_fns::bazel(),
            maven_query_output: None,
            visibility: default_fns::visibility(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color,
        }
    }

    /// Repository root; relative paths in the config resolve against it
    pub fn repository_root(&self) -> PathBuf {
        self.workdir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Override file location after resolving against the repository root
    pub fn overrides_path(&self) -> PathBuf {
        self.repository_root().join(&self.overrides_file)
    }

    /// Query output file location after resolving against the repository root
    pub fn maven_query_output_path(&self) -> Option<PathBuf> {
        self.maven_query_output
            .as_ref()
            .map(|path| self.repository_root().join(path))
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.workdir.is_none() {
            self.workdir = Some(
                std::env::current_dir().map_err(|e| ConfigError::CurrentDirError { source: e })?,
            );
        }

        if let Some(workdir) = &self.workdir {
            if !workdir.is_dir() {
                return Err(ConfigError::InvalidWorkDir {
                    path: workdir.display().to_string(),
                });
            }
        }

        // Prefix matching works on whole directory names
        if !self.source_tree_prefix.is_empty() && !self.source_tree_prefix.ends_with('/') {
            self.source_tree_prefix.push('/');
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
