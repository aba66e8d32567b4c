//! Application layer modules
//!
//! Organizes CLI interface, configuration management, and command execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod session_mocks;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands};
pub use commands::{execute_command, execute_command_with_session, generate_repository};
pub use config::AppConfig;
pub use loader::*;
pub use session::{CommandSession, Session};
