use super::*;
use crate::application::config::AppConfig;
use crate::application::session::{CommandSession, LiveConfigProvider};
use crate::application::session_mocks::{
    MockFileSystemProvider, MockOutputProvider, MockProcessProvider,
};
use std::path::PathBuf;

fn artifact(target: &str, coordinates: &str) -> ArtifactDescriptor {
    ArtifactDescriptor::new(TargetLabel::from(target), coordinates).unwrap()
}

fn lookup<'a>(index: &'a ThirdPartyIndex, package: &str) -> Option<&'a str> {
    index.lookup(&PackageName::new(package)).map(TargetLabel::as_str)
}

#[test]
fn test_nested_placements_register_independently() {
    let index = ThirdPartyIndex::from_artifacts(
        &[
            artifact("@maven//:foo", "com.foo:foo:1.0"),
            artifact("@maven//:foo_bar", "com.foo.bar:bar:1.0"),
        ],
        &OverrideTable::new(),
    )
    .unwrap();

    assert_eq!(lookup(&index, "com.foo"), Some("@maven//:foo"));
    assert_eq!(lookup(&index, "com.foo.bar"), Some("@maven//:foo_bar"));
    assert_eq!(index.len(), 2);
}

#[test]
fn test_len_counts_every_bound_package_across_branches() {
    let overrides = OverrideTable::new().with_placements(
        TargetLabel::from("@maven//:guava"),
        ["com.google.common", "com.google.thirdparty"],
    );
    let index = ThirdPartyIndex::from_artifacts(
        &[
            artifact("@maven//:guava", "com.google.guava:guava:31.1-jre"),
            artifact("@maven//:foo", "com.foo:foo:1.0"),
            artifact("@maven//:foo_bar", "com.foo.bar:bar:1.0"),
            artifact("@maven//:junit", "junit:junit:4.13"),
        ],
        &overrides,
    )
    .unwrap();

    assert_eq!(index.len(), 5);
    assert_eq!(index.len(), index.terminals().len());
    assert!(!index.is_empty());
}

#[test]
fn test_identical_placement_with_different_targets_conflicts() {
    let err = ThirdPartyIndex::from_artifacts(
        &[
            artifact("@maven//:foo_core", "com.foo:core:1.0"),
            artifact("@maven//:foo_extras", "com.foo:extras:1.0"),
        ],
        &OverrideTable::new(),
    )
    .unwrap_err();

    let ThirdPartyIndexError::Conflict {
        package,
        coordinates,
        existing,
        incoming,
    } = err;
    assert_eq!(package.as_str(), "com.foo");
    assert_eq!(coordinates, "com.foo:extras:1.0");
    assert_eq!(existing.as_str(), "@maven//:foo_core");
    assert_eq!(incoming.as_str(), "@maven//:foo_extras");
}

#[test]
fn test_same_target_at_same_placement_is_idempotent() {
    let overrides = OverrideTable::new().with_placements(
        TargetLabel::from("@maven//:foo"),
        ["com.foo", "com.foo"],
    );
    let index =
        ThirdPartyIndex::from_artifacts(&[artifact("@maven//:foo", "com.foo:foo:1.0")], &overrides)
            .unwrap();

    assert_eq!(lookup(&index, "com.foo"), Some("@maven//:foo"));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_override_replaces_coordinate_group() {
    let overrides = OverrideTable::new().with_placements(
        TargetLabel::from("@maven//:com_google_guava_guava"),
        ["com.google.common", "com.google.thirdparty"],
    );
    let index = ThirdPartyIndex::from_artifacts(
        &[artifact(
            "@maven//:com_google_guava_guava",
            "com.google.guava:guava:31.1-jre",
        )],
        &overrides,
    )
    .unwrap();

    assert_eq!(
        lookup(&index, "com.google.common"),
        Some("@maven//:com_google_guava_guava")
    );
    assert_eq!(
        lookup(&index, "com.google.thirdparty"),
        Some("@maven//:com_google_guava_guava")
    );
    assert_eq!(lookup(&index, "com.google.guava"), None);
}

#[test]
fn test_overrides_resolve_shared_group_conflicts() {
    let overrides = OverrideTable::new()
        .with_placements(
            TargetLabel::from("@maven//:jackson_core"),
            ["com.fasterxml.jackson.core"],
        )
        .with_placements(
            TargetLabel::from("@maven//:jackson_databind"),
            ["com.fasterxml.jackson.databind"],
        );
    let artifacts = [
        artifact("@maven//:jackson_core", "com.fasterxml.jackson.core:jackson-core:2.13.3"),
        artifact(
            "@maven//:jackson_databind",
            "com.fasterxml.jackson.core:jackson-databind:2.13.3",
        ),
    ];

    assert!(ThirdPartyIndex::from_artifacts(&artifacts, &OverrideTable::new()).is_err());

    let index = ThirdPartyIndex::from_artifacts(&artifacts, &overrides).unwrap();
    assert_eq!(
        lookup(&index, "com.fasterxml.jackson.databind"),
        Some("@maven//:jackson_databind")
    );
}

#[test]
fn test_terminal_covers_deeper_unindexed_packages() {
    let index = ThirdPartyIndex::from_artifacts(
        &[artifact("@maven//:guava", "com.google.common:guava:1")],
        &OverrideTable::new(),
    )
    .unwrap();

    assert_eq!(lookup(&index, "com.google.common.collect"), Some("@maven//:guava"));
    assert_eq!(lookup(&index, "com.google.common.base.internal"), Some("@maven//:guava"));
}

#[test]
fn test_lookup_only_checks_deepest_reached_node() {
    let index = ThirdPartyIndex::from_artifacts(
        &[
            artifact("@maven//:com", "com:everything:1"),
            artifact("@maven//:foo_bar", "com.foo.bar:bar:1"),
        ],
        &OverrideTable::new(),
    )
    .unwrap();

    // `com.foo` is a branch without a terminal, so the `com` binding is not consulted
    assert_eq!(lookup(&index, "com.foo"), None);
    assert_eq!(lookup(&index, "com.foo.baz"), None);
    assert_eq!(lookup(&index, "com.other"), Some("@maven//:com"));
    assert_eq!(lookup(&index, "com.foo.bar.qux"), Some("@maven//:foo_bar"));
}

#[test]
fn test_lookup_misses_unknown_roots() {
    let index = ThirdPartyIndex::from_artifacts(
        &[artifact("@maven//:foo", "com.foo:foo:1")],
        &OverrideTable::new(),
    )
    .unwrap();

    assert_eq!(lookup(&index, "org.example"), None);
    assert_eq!(lookup(&index, "com"), None);
}

#[test]
fn test_empty_index() {
    let index = ThirdPartyIndex::from_artifacts(&[], &OverrideTable::new()).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert_eq!(lookup(&index, "com.foo"), None);
}

#[test]
fn test_terminals_are_listed_in_package_order() {
    let index = ThirdPartyIndex::from_artifacts(
        &[
            artifact("@maven//:z", "org.z:z:1"),
            artifact("@maven//:a", "com.a:a:1"),
            artifact("@maven//:ab", "com.a.b:ab:1"),
        ],
        &OverrideTable::new(),
    )
    .unwrap();

    let terminals: Vec<(String, &str)> = index
        .terminals()
        .into_iter()
        .map(|(package, target)| (package.to_string(), target.as_str()))
        .collect();
    assert_eq!(
        terminals,
        vec![
            ("com.a".to_string(), "@maven//:a"),
            ("com.a.b".to_string(), "@maven//:ab"),
            ("org.z".to_string(), "@maven//:z"),
        ]
    );
}

#[test]
fn test_serializes_with_wildcard_terminals() {
    let index = ThirdPartyIndex::from_artifacts(
        &[
            artifact("@maven//:a", "com.a:a:1"),
            artifact("@maven//:ab", "com.a.b:ab:1"),
        ],
        &OverrideTable::new(),
    )
    .unwrap();

    let json = serde_json::to_value(&index).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "com": {
                "a": {
                    "**": "@maven//:a",
                    "b": { "**": "@maven//:ab" }
                }
            }
        })
    );
}

#[test]
fn test_initialize_reads_query_output_and_overrides() {
    let query = "jvm_import(\n  name = \"com_google_guava_guava\",\n  tags = [\"maven_coordinates=com.google.guava:guava:31.1-jre\"],\n)\n";
    let overrides = r#"{"@maven//:com_google_guava_guava": ["com.google.common"]}"#;
    let filesystem = MockFileSystemProvider::new()
        .with_file("/repo/maven.query", query)
        .with_file("/repo/3rdparty/jvm/thirdparty_map_overrides.json", overrides);
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        maven_query_output: Some(PathBuf::from("maven.query")),
        ..AppConfig::default()
    };
    let session = CommandSession::new_with_providers(
        filesystem,
        MockProcessProvider::new(),
        LiveConfigProvider::new(config),
        MockOutputProvider::new(),
    );

    let index = ThirdPartyIndex::initialize(&session).unwrap();
    assert_eq!(
        lookup(&index, "com.google.common.collect"),
        Some("@maven//:com_google_guava_guava")
    );
}

#[test]
fn test_initialize_fails_without_override_file() {
    let filesystem = MockFileSystemProvider::new().with_file("/repo/maven.query", "");
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        maven_query_output: Some(PathBuf::from("maven.query")),
        ..AppConfig::default()
    };
    let session = CommandSession::new_with_providers(
        filesystem,
        MockProcessProvider::new(),
        LiveConfigProvider::new(config),
        MockOutputProvider::new(),
    );

    assert!(matches!(
        ThirdPartyIndex::initialize(&session),
        Err(InitializationError::Overrides(OverrideError::Read { .. }))
    ));
}
