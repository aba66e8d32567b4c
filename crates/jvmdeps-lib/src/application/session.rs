//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each command execution creates a session that owns its host collaborators:
//! the filesystem, the process runner used for the metadata query, the
//! configuration and the output sink.

use crate::application::config::AppConfig;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Files and subdirectories of one directory, each sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub regular_files: Vec<String>,
    pub subdirectories: Vec<String>,
}

/// Provider trait for filesystem operations
pub trait FileSystemProvider {
    /// Read entire file contents as string
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Read entire file contents as raw bytes
    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Write string content to file
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// List the immediate entries of a directory
    fn list_directory(&self, path: &Path) -> std::io::Result<DirectoryListing>;
}

/// Process execution output
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Execute a command with given arguments in working directory
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput>;
}

/// Provider trait for configuration access
pub trait ConfigProvider {
    /// Get application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Provider trait for command results written for the user
pub trait OutputProvider {
    fn emit(&self, text: &str) -> Result<()>;
}

/// Session trait providing access to all command dependencies
pub trait Session {
    fn filesystem(&self) -> &dyn FileSystemProvider;

    fn process(&self) -> &dyn ProcessProvider;

    fn config(&self) -> &dyn ConfigProvider;

    fn output(&self) -> &dyn OutputProvider;
}

/// Live implementation of FileSystemProvider
pub struct LiveFileSystemProvider;

impl FileSystemProvider for LiveFileSystemProvider {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    fn list_directory(&self, path: &Path) -> std::io::Result<DirectoryListing> {
        let mut listing = DirectoryListing::default();

        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_dir() {
                listing.subdirectories.push(name);
            } else if file_type.is_file() {
                listing.regular_files.push(name);
            }
        }

        listing.regular_files.sort();
        listing.subdirectories.sort();
        Ok(listing)
    }
}

/// Live implementation of ProcessProvider
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<String>,
}

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH for hermetic testing
    pub fn with_custom_path(path: String) -> Self {
        Self {
            custom_path: Some(path),
        }
    }
}

impl Default for LiveProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        use std::process::Command;

        let mut cmd = Command::new(command);
        cmd.args(args).current_dir(working_dir);

        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }

        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute command: {}", command))?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Live implementation of OutputProvider, writes to stdout
pub struct LiveOutputProvider;

impl OutputProvider for LiveOutputProvider {
    fn emit(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text).context("Failed to write to stdout")
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<F, P, C, O>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    O: OutputProvider,
{
    /// Filesystem operations provider
    filesystem_provider: F,
    /// Process execution provider
    process_provider: P,
    /// Configuration provider
    config_provider: C,
    /// Result output provider
    output_provider: O,
}

impl
    CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider, LiveOutputProvider>
{
    /// Create a new command session with owned state (production composition)
    pub fn new(app_config: AppConfig) -> Self {
        let _ = crate::logger::Logger::init(app_config.to_logger_config());

        Self {
            filesystem_provider: LiveFileSystemProvider,
            process_provider: LiveProcessProvider::new(),
            config_provider: LiveConfigProvider::new(app_config),
            output_provider: LiveOutputProvider,
        }
    }
}

impl<F, P, C, O> CommandSession<F, P, C, O>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    O: OutputProvider,
{
    /// Create a new generic command session with custom providers (for testing)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_with_providers(
        filesystem_provider: F,
        process_provider: P,
        config_provider: C,
        output_provider: O,
    ) -> Self {
        Self {
            filesystem_provider,
            process_provider,
            config_provider,
            output_provider,
        }
    }

    /// Concrete filesystem provider, for inspecting written files in tests
    pub fn filesystem_provider(&self) -> &F {
        &self.filesystem_provider
    }

    /// Concrete output provider, for inspecting captured output in tests
    pub fn output_provider(&self) -> &O {
        &self.output_provider
    }

    /// Concrete process provider, for inspecting recorded calls in tests
    pub fn process_provider(&self) -> &P {
        &self.process_provider
    }
}

impl<F, P, C, O> Session for CommandSession<F, P, C, O>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
    O: OutputProvider,
{
    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }

    fn output(&self) -> &dyn OutputProvider {
        &self.output_provider
    }
}
