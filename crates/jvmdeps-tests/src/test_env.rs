//! Hermetic test environment for E2E testing
//!
//! Creates an isolated repository in a temporary directory together with a
//! `bin/` directory of mock executables, so the live providers can run the
//! metadata query without a real bazel installation.

use anyhow::Result;
use jvmdeps_lib::application::config::AppConfig;
use jvmdeps_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider, LiveProcessProvider,
};
use jvmdeps_lib::application::session_mocks::MockOutputProvider;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Session with live filesystem and process providers and captured output
pub type LiveTestSession =
    CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider, MockOutputProvider>;

/// Mock executable behavior configuration
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Print `stdout` and exit 0
    SucceedWithOutput { stdout: String },
    /// Print `stderr` and exit 1
    AlwaysFail { stderr: String },
}

/// Hermetic test environment with mock executables
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Directory containing mock executables
    pub bin_path: PathBuf,
    /// Repository root
    pub work_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new, empty hermetic test environment
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let bin_path = temp_dir.path().join("bin");
        let work_path = temp_dir.path().join("work");

        fs::create_dir_all(&bin_path)?;
        fs::create_dir_all(&work_path)?;

        Ok(Self {
            temp_dir,
            bin_path,
            work_path,
        })
    }

    /// Environment holding the hello repository and its captured query output
    pub fn with_hello_repository() -> Result<Self> {
        let env = Self::new()?;
        for (path, content) in fixtures::HELLO_REPOSITORY {
            env.write_file(path, content)?;
        }
        env.write_file(fixtures::MAVEN_QUERY_FILE, fixtures::MAVEN_QUERY_OUTPUT)?;
        Ok(env)
    }

    /// Write a file relative to the repository root, creating parents
    pub fn write_file(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.work_path.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_file(&self, rel: &str) -> Result<String> {
        Ok(fs::read_to_string(self.work_path.join(rel))?)
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.work_path.join(rel).exists()
    }

    /// Install a shell script named `name` into the mock `bin/` directory
    ///
    /// Every invocation appends its arguments to `<name>.log` next to `bin/`.
    pub fn add_mock_executable(&self, name: &str, behavior: MockBehavior) -> Result<()> {
        let executable_path = self.bin_path.join(name);
        let script = self.mock_script(name, &behavior);
        fs::write(&executable_path, script)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&executable_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&executable_path, perms)?;
        }

        Ok(())
    }

    /// Arguments of every recorded call to a mock executable, one line each
    pub fn get_mock_calls(&self, name: &str) -> Result<Vec<String>> {
        let log_path = self.log_path(name);
        if !log_path.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(log_path)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn log_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(format!("{}.log", name))
    }

    // Only shell builtins: PATH is restricted to the mock bin directory
    fn mock_script(&self, name: &str, behavior: &MockBehavior) -> String {
        let log_path = self.log_path(name);
        let body = match behavior {
            MockBehavior::SucceedWithOutput { stdout } => {
                format!("printf '%s' '{}'\nexit 0", stdout.replace('\'', r"'\''"))
            }
            MockBehavior::AlwaysFail { stderr } => {
                format!("printf '%s\\n' '{}' >&2\nexit 1", stderr.replace('\'', r"'\''"))
            }
        };

        format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\n{}\n",
            log_path.display(),
            body
        )
    }

    /// Configuration rooted at the repository, with the query output file
    /// used only when it was written
    pub fn app_config(&self) -> AppConfig {
        let query_file = self.work_path.join(fixtures::MAVEN_QUERY_FILE);
        AppConfig {
            workdir: Some(self.work_path.clone()),
            maven_query_output: query_file
                .exists()
                .then(|| PathBuf::from(fixtures::MAVEN_QUERY_FILE)),
            ..AppConfig::default()
        }
    }

    /// Session over the real temp directory, running executables from `bin/`
    pub fn session(&self, app_config: AppConfig) -> LiveTestSession {
        CommandSession::new_with_providers(
            LiveFileSystemProvider,
            LiveProcessProvider::with_custom_path(self.bin_path.display().to_string()),
            LiveConfigProvider::new(app_config),
            MockOutputProvider::new(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.work_path
    }
}
