//! Per-directory rule generation and repository traversal

use crate::application::session::{DirectoryListing, FileSystemProvider};
use crate::jvm::imports::ImportScan;
use crate::jvm::rule::JavaLibraryRule;
use crate::primitives::PackageName;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, error};

const JAVA_EXTENSION: &str = ".java";

/// Name used for a rule generated at the repository root when the root
/// path has no final component
const ROOT_RULE_NAME: &str = "root";

/// Options shared by every directory of one run
#[derive(Debug, Clone)]
pub struct GenerateOptions<'a> {
    pub source_tree_prefix: &'a str,
    pub visibility: &'a str,
}

/// Build the `java_library` rule for one directory
///
/// `dir` is the directory on disk, `rel` its slash-separated path from the
/// repository root. Returns `None` when the directory holds no `.java`
/// files. A source file that cannot be read is logged and contributes no
/// imports; it is still listed in `srcs`.
pub fn generate_rule(
    filesystem: &dyn FileSystemProvider,
    dir: &Path,
    rel: &str,
    listing: &DirectoryListing,
    options: &GenerateOptions<'_>,
) -> Option<JavaLibraryRule> {
    let srcs: Vec<String> = listing
        .regular_files
        .iter()
        .filter(|name| name.ends_with(JAVA_EXTENSION))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if srcs.is_empty() {
        return None;
    }

    let mut imports = BTreeSet::new();
    for src in &srcs {
        debug!("found file: {}", src);
        let path = dir.join(src);
        match ImportScan::from_file(filesystem, &path) {
            Ok(scan) => imports.extend(scan.packages),
            Err(e) => error!("failed to parse imports from {}: {}", path.display(), e),
        }
    }

    Some(JavaLibraryRule {
        name: rule_name(dir, rel),
        package_dir: rel.to_string(),
        package: PackageName::from_directory(rel, options.source_tree_prefix),
        srcs,
        visibility: vec![options.visibility.to_string()],
        imports,
        deps: None,
    })
}

fn rule_name(dir: &Path, rel: &str) -> String {
    match rel.rsplit('/').next() {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| ROOT_RULE_NAME.to_string()),
    }
}

/// Directories the walk never enters: hidden ones and Bazel output links
pub fn is_skipped_directory(name: &str) -> bool {
    name.starts_with('.') || name.starts_with("bazel-")
}

/// Every directory under `root`, children before parents
///
/// Entries are relative slash-separated paths; the root itself is `""`
/// and comes last. Siblings are visited in name order.
pub fn walk_post_order(
    filesystem: &dyn FileSystemProvider,
    root: &Path,
) -> std::io::Result<Vec<(String, DirectoryListing)>> {
    let mut order = Vec::new();
    visit(filesystem, root, String::new(), &mut order)?;
    Ok(order)
}

fn visit(
    filesystem: &dyn FileSystemProvider,
    root: &Path,
    rel: String,
    order: &mut Vec<(String, DirectoryListing)>,
) -> std::io::Result<()> {
    let listing = filesystem.list_directory(&root.join(&rel))?;

    for child in &listing.subdirectories {
        if is_skipped_directory(child) {
            continue;
        }
        let child_rel = if rel.is_empty() {
            child.clone()
        } else {
            format!("{rel}/{child}")
        };
        visit(filesystem, root, child_rel, order)?;
    }

    order.push((rel, listing));
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("generate.test.rs");
}
