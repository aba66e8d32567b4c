use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// jvmdeps CLI - Bazel dependency inference for Java sources
#[derive(Debug, Clone, Parser)]
#[command(name = "jvmdeps")]
#[command(about = "Generate java_library rules with resolved deps from Java imports")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// jvmdeps commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration: .env files, standard env vars, then CLI arguments
    pub fn load() -> Result<Self, ConfigError> {
        super::loader::load_env_files()?;
        Self::from_cli(Cli::parse())
    }

    /// Finish loading from an already parsed command line
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let app_config = AppConfig::finalize(cli.config)?;
        Ok(Self {
            app_config,
            command: cli.command,
        })
    }
}

/// Available jvmdeps commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Walk the repository and generate java_library rules with resolved deps
    Generate {
        /// Write BUILD.bazel files instead of printing the rules
        #[arg(long, help = "Overwrite BUILD.bazel in each directory with a generated rule")]
        write: bool,
    },

    /// Print the packages imported by Java source files
    Imports {
        /// Source files to scan
        #[arg(required = true, help = "Java source files to scan")]
        files: Vec<PathBuf>,
    },

    /// Dump the third-party index or look up packages in it
    Thirdparty {
        /// Packages to look up; dumps the whole index as JSON when empty
        #[arg(help = "Java packages to resolve against third-party artifacts")]
        packages: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
