//! Hierarchical package → third-party target index
//!
//! The index is a tree keyed by package segments. Any node may carry a
//! terminal binding meaning "this package and everything below it is
//! provided by this target, unless a deeper path says otherwise":
//!
//! ```text
//! com
//! └── fasterxml
//!     └── jackson
//!         ├── core      ** @maven//:com_fasterxml_jackson_core_jackson_core
//!         └── databind  ** @maven//:com_fasterxml_jackson_core_jackson_databind
//! ```
//!
//! Lookups only ever inspect the terminal of the deepest node the walk
//! reaches. A terminal on a shallower ancestor is never used as a fallback.

use crate::application::session::Session;
use crate::jvm::metadata::{self, MetadataError};
use crate::jvm::overrides::{OverrideError, OverrideTable};
use crate::primitives::{ArtifactDescriptor, PackageName, TargetLabel};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur while building the third-party index
#[derive(Debug, Error)]
pub enum ThirdPartyIndexError {
    #[error(
        "package \"{package}\" for coordinates \"{coordinates}\" already exists in 3rdparty map as \"{existing}\" (conflicts with \"{incoming}\")"
    )]
    Conflict {
        package: PackageName,
        coordinates: String,
        existing: TargetLabel,
        incoming: TargetLabel,
    },
}

/// Any failure while setting up the third-party index for a session
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Overrides(#[from] OverrideError),

    #[error(transparent)]
    Index(#[from] ThirdPartyIndexError),
}

/// One node of the index
///
/// Serializes in the `{"segment": {...}, "**": "target"}` shape, with `**`
/// marking the terminal binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Branch {
    #[serde(flatten)]
    children: BTreeMap<String, Branch>,
    #[serde(rename = "**", skip_serializing_if = "Option::is_none")]
    terminal: Option<TargetLabel>,
}

impl Branch {
    pub fn child(&self, segment: &str) -> Option<&Branch> {
        self.children.get(segment)
    }

    pub fn terminal(&self) -> Option<&TargetLabel> {
        self.terminal.as_ref()
    }

    fn count_terminals(&self) -> usize {
        let own = usize::from(self.terminal.is_some());
        own + self
            .children
            .values()
            .map(Branch::count_terminals)
            .sum::<usize>()
    }

    fn collect_terminals<'a>(
        &'a self,
        path: &mut Vec<&'a str>,
        out: &mut Vec<(PackageName, &'a TargetLabel)>,
    ) {
        if let Some(terminal) = &self.terminal {
            out.push((PackageName::new(path.join(".")), terminal));
        }
        for (segment, child) in &self.children {
            path.push(segment);
            child.collect_terminals(path, out);
            path.pop();
        }
    }
}

/// Mutable stage of index construction
#[derive(Debug, Default)]
pub struct ThirdPartyIndexBuilder {
    root: Branch,
}

impl ThirdPartyIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `artifact` at `package`, creating branches as needed
    ///
    /// Binding the same target twice at one path is a no-op. A different
    /// target at an already bound path is a conflict.
    pub fn register(
        &mut self,
        package: &PackageName,
        artifact: &ArtifactDescriptor,
    ) -> Result<(), ThirdPartyIndexError> {
        let mut node = &mut self.root;
        for segment in package.segments() {
            node = node.children.entry(segment.to_string()).or_default();
        }

        if let Some(existing) = &node.terminal {
            if *existing == artifact.target {
                return Ok(());
            }
            return Err(ThirdPartyIndexError::Conflict {
                package: package.clone(),
                coordinates: artifact.coordinates.clone(),
                existing: existing.clone(),
                incoming: artifact.target.clone(),
            });
        }

        trace!(%package, label = %artifact.target, "registered 3rdparty package");
        node.terminal = Some(artifact.target.clone());
        Ok(())
    }

    /// Register `artifact` at its override placements, or at its maven group
    pub fn add_artifact(
        &mut self,
        artifact: &ArtifactDescriptor,
        overrides: &OverrideTable,
    ) -> Result<(), ThirdPartyIndexError> {
        match overrides.placements(&artifact.target) {
            Some(packages) => {
                debug!(label = %artifact.target, ?packages, "using override placement");
                for package in packages {
                    self.register(package, artifact)?;
                }
                Ok(())
            }
            None => self.register(&PackageName::new(artifact.coordinate_group()), artifact),
        }
    }

    pub fn build(self) -> ThirdPartyIndex {
        ThirdPartyIndex { root: self.root }
    }
}

/// Immutable third-party index, built once per session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThirdPartyIndex {
    root: Branch,
}

impl ThirdPartyIndex {
    /// Build the index from artifacts in query order
    pub fn from_artifacts(
        artifacts: &[ArtifactDescriptor],
        overrides: &OverrideTable,
    ) -> Result<Self, ThirdPartyIndexError> {
        let mut builder = ThirdPartyIndexBuilder::new();
        for artifact in artifacts {
            builder.add_artifact(artifact, overrides)?;
        }
        Ok(builder.build())
    }

    /// Query artifact metadata, read the override file and build the index
    ///
    /// Runs once before any rule is generated. Every failure here is fatal
    /// for the session.
    pub fn initialize(session: &dyn Session) -> Result<Self, InitializationError> {
        let artifacts = metadata::load_artifacts(session)?;

        let overrides_path = session.config().app_config().overrides_path();
        let overrides = OverrideTable::load(session.filesystem(), &overrides_path)?;

        let index = Self::from_artifacts(&artifacts, &overrides)?;
        info!(
            artifacts = artifacts.len(),
            overrides = overrides.len(),
            packages = index.len(),
            "built 3rdparty map"
        );
        Ok(index)
    }

    /// Target providing `package`, if any
    ///
    /// Walks one segment at a time while a matching child exists, then
    /// checks only the node where the walk stopped.
    pub fn lookup(&self, package: &PackageName) -> Option<&TargetLabel> {
        let mut node = &self.root;
        for segment in package.segments() {
            match node.child(segment) {
                Some(child) => node = child,
                None => break,
            }
        }
        node.terminal()
    }

    pub fn root(&self) -> &Branch {
        &self.root
    }

    /// Every bound package with its target, in package order
    pub fn terminals(&self) -> Vec<(PackageName, &TargetLabel)> {
        let mut out = Vec::new();
        self.root.collect_terminals(&mut Vec::new(), &mut out);
        out
    }

    /// Number of bound packages
    pub fn len(&self) -> usize {
        self.root.count_terminals()
    }

    pub fn is_empty(&self) -> bool {
        self.root.terminal.is_none() && self.root.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    include!("thirdparty.test.rs");
}
