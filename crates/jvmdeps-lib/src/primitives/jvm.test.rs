use super::*;

#[test]
fn test_package_segments() {
    let package = PackageName::new("com.fasterxml.jackson.core");
    let segments: Vec<&str> = package.segments().collect();
    assert_eq!(segments, vec!["com", "fasterxml", "jackson", "core"]);
}

#[test]
fn test_package_from_directory_strips_source_tree_prefix() {
    assert_eq!(
        PackageName::from_directory("src/jvm/common/print", "src/jvm/"),
        PackageName::new("common.print")
    );
    assert_eq!(
        PackageName::from_directory("hello/src/jvm/hello", "src/jvm/"),
        PackageName::new("hello")
    );
}

#[test]
fn test_package_from_directory_outside_prefix() {
    assert_eq!(
        PackageName::from_directory("tools/codegen", "src/jvm/"),
        PackageName::new("tools.codegen")
    );
    assert_eq!(
        PackageName::from_directory("lib/util", ""),
        PackageName::new("lib.util")
    );
}

#[test]
fn test_target_label_forms() {
    assert_eq!(
        TargetLabel::external("maven", "com_google_guava_guava").as_str(),
        "@maven//:com_google_guava_guava"
    );
    assert_eq!(
        TargetLabel::local_package("src/jvm/common/print").as_str(),
        "//src/jvm/common/print"
    );
}

#[test]
fn test_target_labels_order_bytewise() {
    let mut labels = vec![
        TargetLabel::from("@maven//:b"),
        TargetLabel::from("//src/jvm/a"),
        TargetLabel::from("@maven//:a"),
    ];
    labels.sort();
    let ordered: Vec<&str> = labels.iter().map(TargetLabel::as_str).collect();
    assert_eq!(ordered, vec!["//src/jvm/a", "@maven//:a", "@maven//:b"]);
}

#[test]
fn test_rule_label_display_and_dependency_label() {
    let label = RuleLabel::new("src/jvm/hello", "hello");
    assert_eq!(label.to_string(), "src/jvm/hello:hello");
    assert_eq!(label.dependency_label().as_str(), "//src/jvm/hello");
}

#[test]
fn test_artifact_coordinate_group() {
    let artifact = ArtifactDescriptor::new(
        TargetLabel::from("@maven//:com_google_guava_guava"),
        "com.google.guava:guava:31.1-jre",
    )
    .unwrap();
    assert_eq!(artifact.coordinate_group(), "com.google.guava");
    assert_eq!(artifact.coordinates, "com.google.guava:guava:31.1-jre");
}

#[test]
fn test_artifact_requires_colon_in_coordinates() {
    assert!(ArtifactDescriptor::new(TargetLabel::from("@maven//:x"), "no-colons-here").is_none());
}
