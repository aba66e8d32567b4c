use crate::primitives::TargetLabel;
use std::collections::BTreeSet;

/// Resolved dependencies of one rule, de-duplicated and sorted bytewise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet(BTreeSet<TargetLabel>);

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the target was already present
    pub fn insert(&mut self, target: TargetLabel) -> bool {
        self.0.insert(target)
    }

    pub fn contains(&self, target: &TargetLabel) -> bool {
        self.0.contains(target)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetLabel> {
        self.0.iter()
    }

    /// Value for the `deps` attribute; `None` means the attribute is omitted
    pub fn into_attr(self) -> Option<Vec<String>> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.into_iter().map(TargetLabel::into_string).collect())
    }
}

impl FromIterator<TargetLabel> for DependencySet {
    fn from_iter<I: IntoIterator<Item = TargetLabel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<TargetLabel> for DependencySet {
    fn extend<I: IntoIterator<Item = TargetLabel>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_omits_attribute() {
        assert_eq!(DependencySet::new().into_attr(), None);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut deps = DependencySet::new();
        assert!(deps.insert(TargetLabel::from("//src/jvm/common/print")));
        assert!(!deps.insert(TargetLabel::from("//src/jvm/common/print")));
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_attribute_is_byte_ordered() {
        let deps: DependencySet = [
            "@maven//:com_google_guava_guava",
            "//src/jvm/hello/util",
            "@maven//:com_fasterxml_jackson_core_jackson_core",
            "//src/jvm/common/print",
        ]
        .into_iter()
        .map(TargetLabel::from)
        .collect();

        // '/' sorts before '@'
        assert_eq!(
            deps.into_attr(),
            Some(vec![
                "//src/jvm/common/print".to_string(),
                "//src/jvm/hello/util".to_string(),
                "@maven//:com_fasterxml_jackson_core_jackson_core".to_string(),
                "@maven//:com_google_guava_guava".to_string(),
            ])
        );
    }
}
