use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Dot-separated Java package name, e.g. `com.fasterxml.jackson.core`
///
/// Equality is plain string equality. No normalization happens here; the
/// import extractor hands over exactly what appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-delimited components, outermost first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Package declared by the rule living in `rel`
    ///
    /// Packages are assumed to mirror the directory layout below the source
    /// tree prefix: `src/jvm/common/print` with prefix `src/jvm/` declares
    /// `common.print`. A directory outside the prefix maps its whole path.
    pub fn from_directory(rel: &str, source_tree_prefix: &str) -> Self {
        let package_dir = match rel.find(source_tree_prefix) {
            Some(start) if !source_tree_prefix.is_empty() => &rel[start + source_tree_prefix.len()..],
            _ => rel,
        };

        Self(package_dir.trim_matches('/').replace('/', "."))
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Opaque Bazel label naming a build artifact
///
/// Ordered bytewise so dependency lists serialize deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetLabel(String);

impl TargetLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// `@<repository>//:<name>`, the form rules_jvm_external generates
    pub fn external(repository: &str, name: &str) -> Self {
        Self(format!("@{repository}//:{name}"))
    }

    /// Short `//<package>` form used for in-repository dependencies
    pub fn local_package(package_dir: &str) -> Self {
        Self(format!("//{package_dir}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TargetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Label of a rule generated inside this repository
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleLabel {
    /// Slash-separated directory relative to the repository root
    pub pkg: String,
    pub name: String,
}

impl RuleLabel {
    pub fn new(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pkg: pkg.into(),
            name: name.into(),
        }
    }

    /// Dependency label for this rule; the rule name is assumed to match its directory
    pub fn dependency_label(&self) -> TargetLabel {
        TargetLabel::local_package(&self.pkg)
    }
}

impl fmt::Display for RuleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pkg, self.name)
    }
}

/// One `import` statement found in a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub source_file: PathBuf,
    pub package: PackageName,
    /// Static imports are kept for diagnostics and never resolved
    pub is_static: bool,
}

/// Third-party artifact as reported by the metadata query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub target: TargetLabel,
    /// Full `group:artifact:version` coordinates
    pub coordinates: String,
    group_len: usize,
}

impl ArtifactDescriptor {
    /// Returns `None` when the coordinates carry no `:` separator
    pub fn new(target: TargetLabel, coordinates: impl Into<String>) -> Option<Self> {
        let coordinates = coordinates.into();
        let group_len = coordinates.find(':')?;
        Some(Self {
            target,
            coordinates,
            group_len,
        })
    }

    /// Portion of the coordinates before the first colon
    pub fn coordinate_group(&self) -> &str {
        &self.coordinates[..self.group_len]
    }
}

#[cfg(test)]
mod tests {
    include!("jvm.test.rs");
}
