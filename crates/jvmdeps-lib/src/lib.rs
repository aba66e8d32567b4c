//! # jvmdeps Library
//!
//! Bazel dependency inference for Java sources.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared configuration enums
//! - [`jvm`] - Import extraction, the third-party index and import resolution
//! - [`logger`] - Structured logging with progress tracking
//! - [`application`] - CLI interface, sessions and command execution
//!
//! ## Quick Start
//!
//! ```no_run
//! // Parse the command line and run jvmdeps
//! jvmdeps_lib::main().unwrap();
//! ```

pub mod application;
pub mod jvm;
pub mod logger;
pub mod primitives;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use jvm::{Resolver, ThirdPartyIndex};
pub use logger::Logger;
pub use primitives::{ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, PackageName, TargetLabel};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config)
}
