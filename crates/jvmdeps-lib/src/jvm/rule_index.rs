//! In-repository package index
//!
//! Maps a package name to every generated rule that declares it. Rules are
//! only ever appended, in the order their directories finish processing, so
//! a lookup sees exactly the rules of directories visited earlier.

use crate::primitives::{PackageName, RuleLabel};
use std::collections::HashMap;

/// Lookup of rules declaring a package
pub trait RuleIndex {
    /// Rules declaring exactly `package`, in insertion order
    fn find_rules(&self, package: &PackageName) -> &[RuleLabel];
}

/// Append-only [`RuleIndex`] built up during a repository walk
#[derive(Debug, Clone, Default)]
pub struct RepositoryRuleIndex {
    rules: HashMap<PackageName, Vec<RuleLabel>>,
}

impl RepositoryRuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, package: PackageName, label: RuleLabel) {
        self.rules.entry(package).or_default().push(label);
    }

    /// Number of indexed rules
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleIndex for RepositoryRuleIndex {
    fn find_rules(&self, package: &PackageName) -> &[RuleLabel] {
        self.rules.get(package).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_package_has_no_rules() {
        let index = RepositoryRuleIndex::new();
        assert!(index.find_rules(&PackageName::new("a.b")).is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_rules_accumulate_per_package() {
        let mut index = RepositoryRuleIndex::new();
        index.add(PackageName::new("common.print"), RuleLabel::new("src/jvm/common/print", "print"));
        index.add(PackageName::new("hello.util"), RuleLabel::new("src/jvm/hello/util", "util"));
        index.add(PackageName::new("common.print"), RuleLabel::new("lib/common/print", "print"));

        let rules = index.find_rules(&PackageName::new("common.print"));
        assert_eq!(
            rules,
            &[
                RuleLabel::new("src/jvm/common/print", "print"),
                RuleLabel::new("lib/common/print", "print"),
            ]
        );
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut index = RepositoryRuleIndex::new();
        index.add(PackageName::new("hello"), RuleLabel::new("src/jvm/hello", "hello"));

        assert!(index.find_rules(&PackageName::new("hello.util")).is_empty());
        assert!(index.find_rules(&PackageName::new("hell")).is_empty());
    }
}
