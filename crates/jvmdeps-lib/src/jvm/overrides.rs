//! Third-party placement overrides
//!
//! By default an artifact is placed in the third-party index at its maven
//! group. That is wrong whenever the group does not match the Java packages
//! the jar ships (`com.google.guava` ships `com.google.common`), or when
//! several artifacts share a group. The override file lists, per target,
//! the packages it should be registered at instead:
//!
//! ```json
//! {
//!   "@maven//:com_google_guava_guava": ["com.google.common"],
//!   "@maven//:com_fasterxml_jackson_core_jackson_core": ["com.fasterxml.jackson.core"]
//! }
//! ```

use crate::application::session::FileSystemProvider;
use crate::primitives::{PackageName, TargetLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading the override table
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("unable to read 3rdparty map override file: {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse 3rdparty map override file: {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Target → packages it should be registered at, replacing its maven group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTable(BTreeMap<TargetLabel, Vec<PackageName>>);

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON override document; `path` is only used for errors
    pub fn parse(json: &str, path: &Path) -> Result<Self, OverrideError> {
        serde_json::from_str(json).map_err(|source| OverrideError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the override file
    pub fn load(filesystem: &dyn FileSystemProvider, path: &Path) -> Result<Self, OverrideError> {
        let json = filesystem
            .read_to_string(path)
            .map_err(|source| OverrideError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let table = Self::parse(&json, path)?;
        debug!(path = %path.display(), targets = table.len(), "loaded 3rdparty map overrides");
        Ok(table)
    }

    /// Add placements for `target`, appending to any already listed
    pub fn with_placements<I, P>(mut self, target: TargetLabel, packages: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PackageName>,
    {
        self.0
            .entry(target)
            .or_default()
            .extend(packages.into_iter().map(Into::into));
        self
    }

    /// Override placements for `target`, in file order
    pub fn placements(&self, target: &TargetLabel) -> Option<&[PackageName]> {
        self.0.get(target).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    include!("overrides.test.rs");
}
