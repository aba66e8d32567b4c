use super::*;
use crate::jvm::overrides::OverrideTable;
use crate::jvm::rule_index::RepositoryRuleIndex;
use crate::primitives::{ArtifactDescriptor, RuleLabel};

fn third_party(artifacts: &[(&str, &str)]) -> ThirdPartyIndex {
    let artifacts: Vec<ArtifactDescriptor> = artifacts
        .iter()
        .map(|(target, coordinates)| {
            ArtifactDescriptor::new(TargetLabel::from(*target), *coordinates).unwrap()
        })
        .collect();
    ThirdPartyIndex::from_artifacts(&artifacts, &OverrideTable::new()).unwrap()
}

fn packages(names: &[&str]) -> Vec<PackageName> {
    names.iter().map(|name| PackageName::new(*name)).collect()
}

#[test]
fn test_local_rule_resolves_to_directory_label() {
    let resolver = Resolver::new(ThirdPartyIndex::default());
    let mut rules = RepositoryRuleIndex::new();
    rules.add(PackageName::new("common.print"), RuleLabel::new("src/jvm/common/print", "print"));

    let resolution = resolver
        .resolve_package(&PackageName::new("common.print"), &rules)
        .unwrap();
    assert_eq!(resolution, Resolution::Local(TargetLabel::from("//src/jvm/common/print")));
}

#[test]
fn test_local_rule_shadows_third_party() {
    let resolver = Resolver::new(third_party(&[("@maven//:common", "common.print:print:1")]));
    let mut rules = RepositoryRuleIndex::new();
    rules.add(PackageName::new("common.print"), RuleLabel::new("src/jvm/common/print", "print"));

    let resolution = resolver
        .resolve_package(&PackageName::new("common.print"), &rules)
        .unwrap();
    assert!(matches!(resolution, Resolution::Local(_)));
}

#[test]
fn test_third_party_fallback() {
    let resolver = Resolver::new(third_party(&[(
        "@maven//:com_fasterxml_jackson_core_jackson_core",
        "com.fasterxml.jackson.core:jackson-core:2.13.3",
    )]));

    let resolution = resolver
        .resolve_package(
            &PackageName::new("com.fasterxml.jackson.core"),
            &RepositoryRuleIndex::new(),
        )
        .unwrap();
    assert_eq!(
        resolution.target().as_str(),
        "@maven//:com_fasterxml_jackson_core_jackson_core"
    );
}

#[test]
fn test_ambiguous_local_rules_list_every_candidate() {
    let resolver = Resolver::new(ThirdPartyIndex::default());
    let mut rules = RepositoryRuleIndex::new();
    rules.add(PackageName::new("hello.util"), RuleLabel::new("src/jvm/hello/util", "util"));
    rules.add(PackageName::new("hello.util"), RuleLabel::new("lib/jvm/hello/util", "util"));

    let err = resolver
        .resolve_package(&PackageName::new("hello.util"), &rules)
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Ambiguous {
            package: PackageName::new("hello.util"),
            candidates: vec![
                "src/jvm/hello/util:util".to_string(),
                "lib/jvm/hello/util:util".to_string(),
            ],
        }
    );
}

#[test]
fn test_unknown_package_is_unresolved() {
    let resolver = Resolver::new(third_party(&[("@maven//:foo", "com.foo:foo:1")]));
    let err = resolver
        .resolve_package(&PackageName::new("org.example"), &RepositoryRuleIndex::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to find a BUILD target containing the \"org.example\" package"
    );
}

#[test]
fn test_ancestor_terminal_is_not_a_fallback() {
    let resolver = Resolver::new(third_party(&[
        ("@maven//:com", "com:everything:1"),
        ("@maven//:foo_bar", "com.foo.bar:bar:1"),
    ]));
    let rules = RepositoryRuleIndex::new();

    assert!(matches!(
        resolver.resolve_package(&PackageName::new("com.foo"), &rules),
        Err(ResolveError::Unresolved { .. })
    ));
    assert_eq!(
        resolver
            .resolve_package(&PackageName::new("com.other"), &rules)
            .unwrap()
            .target()
            .as_str(),
        "@maven//:com"
    );
}

#[test]
fn test_resolve_collects_sorted_unique_targets() {
    let resolver = Resolver::new(third_party(&[
        ("@maven//:jackson_core", "com.fasterxml.jackson.core:jackson-core:2"),
        ("@maven//:guava", "com.google.common:guava:31"),
    ]));
    let mut rules = RepositoryRuleIndex::new();
    rules.add(PackageName::new("hello.util"), RuleLabel::new("src/jvm/hello/util", "util"));

    let imports = packages(&[
        "com.google.common.collect",
        "com.fasterxml.jackson.core",
        "hello.util",
        "com.google.common.base",
    ]);
    let deps = resolver.resolve(&imports, &rules).unwrap();
    assert_eq!(
        deps.into_attr(),
        Some(vec![
            "//src/jvm/hello/util".to_string(),
            "@maven//:guava".to_string(),
            "@maven//:jackson_core".to_string(),
        ])
    );
}

#[test]
fn test_resolve_fails_on_first_unresolved_package() {
    let resolver = Resolver::new(third_party(&[("@maven//:foo", "com.foo:foo:1")]));
    let imports = packages(&["com.foo", "net.missing", "org.missing"]);

    assert_eq!(
        resolver.resolve(&imports, &RepositoryRuleIndex::new()),
        Err(ResolveError::Unresolved {
            package: PackageName::new("net.missing")
        })
    );
}

#[test]
fn test_resolve_without_imports_is_empty() {
    let resolver = Resolver::new(ThirdPartyIndex::default());
    let imports: Vec<PackageName> = Vec::new();
    let deps = resolver.resolve(&imports, &RepositoryRuleIndex::new()).unwrap();
    assert!(deps.is_empty());
}
