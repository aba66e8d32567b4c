//! Import statement extraction
//!
//! This is brute-force line matching, not a Java parser. Only the leading,
//! contiguous block of `import` lines is examined: the first non-import line
//! after an import ends the scan, so imports separated from the block by a
//! blank line or a comment are not collected.

use crate::application::session::FileSystemProvider;
use crate::primitives::{ImportRecord, PackageName};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const IMPORT_PREFIX: &str = "import ";
const STATIC_PREFIX: &str = "static ";

/// Errors that can occur while scanning a source file
#[derive(Debug, Error)]
pub enum ImportScanError {
    #[error("Failed to read source file: {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Import lines that were recognized but not collected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportWarning {
    #[error("possibly malformed import: '{line}'")]
    Malformed { line: String },

    #[error("static imports not currently supported, skipping: '{line}'")]
    UnsupportedStatic { line: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No import seen yet
    Seeking,
    /// Inside the leading import block
    InBlock,
    Done,
}

/// Result of scanning one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportScan {
    /// Distinct non-static packages, sorted
    pub packages: BTreeSet<PackageName>,
    /// Every parsed statement in file order, static ones included
    pub records: Vec<ImportRecord>,
    pub warnings: Vec<ImportWarning>,
}

impl ImportScan {
    /// Scan in-memory source text
    pub fn from_source(source_file: &Path, text: &str) -> Self {
        let mut scan = Self::default();
        let mut state = ScanState::Seeking;

        for line in text.lines() {
            state = match (state, line.strip_prefix(IMPORT_PREFIX)) {
                (ScanState::Seeking, None) => continue,
                (_, Some(statement)) => {
                    scan.push_statement(source_file, line, statement);
                    ScanState::InBlock
                }
                (ScanState::InBlock | ScanState::Done, None) => ScanState::Done,
            };

            if state == ScanState::Done {
                break;
            }
        }

        scan
    }

    /// Read and scan a source file through the session filesystem
    ///
    /// Bytes outside UTF-8 are replaced rather than rejected; import
    /// statements are ASCII, so stray encodings elsewhere in the file never
    /// hide them.
    pub fn from_file(
        filesystem: &dyn FileSystemProvider,
        source_file: &Path,
    ) -> Result<Self, ImportScanError> {
        let bytes = filesystem
            .read_bytes(source_file)
            .map_err(|source| ImportScanError::Read {
                path: source_file.to_path_buf(),
                source,
            })?;

        Ok(Self::from_source(source_file, &String::from_utf8_lossy(&bytes)))
    }

    fn push_statement(&mut self, source_file: &Path, line: &str, statement: &str) {
        // The package is everything before the trailing `.Symbol;`
        let package = match statement.rfind('.') {
            Some(end) if end > 0 => &statement[..end],
            _ => {
                warn!(file = %source_file.display(), "possibly malformed import: '{}'", line);
                self.warnings.push(ImportWarning::Malformed {
                    line: line.to_string(),
                });
                return;
            }
        };

        if let Some(static_member) = package.strip_prefix(STATIC_PREFIX) {
            warn!(
                file = %source_file.display(),
                "static imports not currently supported, skipping: '{}'", line
            );
            self.warnings.push(ImportWarning::UnsupportedStatic {
                line: line.to_string(),
            });
            self.records.push(ImportRecord {
                source_file: source_file.to_path_buf(),
                package: PackageName::new(static_member),
                is_static: true,
            });
            return;
        }

        debug!(file = %source_file.display(), "found imported package: '{}'", package);
        let package = PackageName::new(package);
        self.records.push(ImportRecord {
            source_file: source_file.to_path_buf(),
            package: package.clone(),
            is_static: false,
        });
        self.packages.insert(package);
    }
}

#[cfg(test)]
mod tests {
    include!("imports.test.rs");
}
