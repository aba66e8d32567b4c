//! In-memory providers for hermetic session tests

use crate::application::session::{
    DirectoryListing, FileSystemProvider, OutputProvider, ProcessOutput, ProcessProvider,
};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Filesystem backed by a map of absolute paths to file contents
///
/// Directories exist implicitly as ancestors of stored files.
#[derive(Debug, Default)]
pub struct MockFileSystemProvider {
    pub files: RefCell<BTreeMap<PathBuf, String>>,
    /// Paths whose writes fail
    pub unwritable: Vec<PathBuf>,
    /// Files holding content that is not valid UTF-8
    pub binary_files: BTreeMap<PathBuf, Vec<u8>>,
    /// Paths whose reads fail with `PermissionDenied`
    pub unreadable: Vec<PathBuf>,
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), content.to_string());
        self
    }

    pub fn with_unreadable_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.files.borrow_mut().insert(path.clone(), String::new());
        self.unreadable.push(path);
        self
    }

    pub fn with_unwritable_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.unwritable.push(path.into());
        self
    }

    pub fn with_bytes(mut self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
        let path = path.into();
        self.files.borrow_mut().insert(path.clone(), String::new());
        self.binary_files.insert(path, content.to_vec());
        self
    }

    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl MockFileSystemProvider {
    fn check_readable(&self, path: &Path) -> std::io::Result<()> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        Ok(())
    }
}

impl FileSystemProvider for MockFileSystemProvider {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.check_readable(path)?;
        if self.binary_files.contains_key(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ));
        }

        self.files.borrow().get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file")
        })
    }

    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.check_readable(path)?;
        if let Some(bytes) = self.binary_files.get(path) {
            return Ok(bytes.clone());
        }

        self.read_to_string(path).map(String::into_bytes)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if self.unwritable.iter().any(|p| p == path) {
            anyhow::bail!("Failed to write file: {}", path.display());
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn list_directory(&self, path: &Path) -> std::io::Result<DirectoryListing> {
        let files = self.files.borrow();
        let mut listing = DirectoryListing::default();
        let mut found = false;

        for file in files.keys() {
            let Ok(rest) = file.strip_prefix(path) else {
                continue;
            };
            found = true;

            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();

            let entries = if components.next().is_some() {
                &mut listing.subdirectories
            } else {
                &mut listing.regular_files
            };
            if !entries.contains(&name) {
                entries.push(name);
            }
        }

        if !found {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such directory",
            ));
        }

        listing.regular_files.sort();
        listing.subdirectories.sort();
        Ok(listing)
    }
}

/// Recorded invocation of [`MockProcessProvider::execute`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Process provider returning canned results keyed by command and arguments
#[derive(Debug, Default)]
pub struct MockProcessProvider {
    pub calls: RefCell<Vec<ProcessCall>>,
    pub results: HashMap<(String, Vec<String>), std::result::Result<ProcessOutput, String>>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(
        mut self,
        command: String,
        args: Vec<String>,
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        self.results.insert((command, args), result);
        self
    }

    /// Get all recorded process calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
        });

        let key = (
            command.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        );
        match self.results.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Err(anyhow::anyhow!(
                "Failed to execute command: {} (no mock result registered)",
                command
            )),
        }
    }
}

/// Output provider capturing every emitted block
#[derive(Debug, Default)]
pub struct MockOutputProvider {
    pub emitted: RefCell<Vec<String>>,
}

impl MockOutputProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, newline-joined
    pub fn text(&self) -> String {
        self.emitted.borrow().join("\n")
    }
}

impl OutputProvider for MockOutputProvider {
    fn emit(&self, text: &str) -> Result<()> {
        self.emitted.borrow_mut().push(text.to_string());
        Ok(())
    }
}
