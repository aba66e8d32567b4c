use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

const OVERRIDES: &str = r#"{
  "@maven//:com_google_guava_guava": ["com.google.common", "com.google.thirdparty"],
  "@maven//:javax_inject_javax_inject": ["javax.inject"]
}"#;

#[test]
fn test_parse_override_table() {
    let table = OverrideTable::parse(OVERRIDES, Path::new("overrides.json")).unwrap();
    assert_eq!(table.len(), 2);

    let guava = table
        .placements(&TargetLabel::from("@maven//:com_google_guava_guava"))
        .unwrap();
    assert_eq!(
        guava,
        &[
            PackageName::new("com.google.common"),
            PackageName::new("com.google.thirdparty"),
        ]
    );
    assert!(table.placements(&TargetLabel::from("@maven//:other")).is_none());
}

#[test]
fn test_empty_object_is_valid() {
    let table = OverrideTable::parse("{}", Path::new("overrides.json")).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_wrong_shape_is_a_parse_error() {
    let err = OverrideTable::parse(r#"{"@maven//:x": "not.a.list"}"#, Path::new("o.json"))
        .unwrap_err();
    match err {
        OverrideError::Parse { path, .. } => assert_eq!(path, PathBuf::from("o.json")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    assert!(matches!(
        OverrideTable::parse("{", Path::new("o.json")),
        Err(OverrideError::Parse { .. })
    ));
}

#[test]
fn test_load_missing_file_is_a_read_error() {
    let filesystem = MockFileSystemProvider::new();
    let err = OverrideTable::load(&filesystem, Path::new("/repo/3rdparty/jvm/o.json")).unwrap_err();
    assert!(matches!(err, OverrideError::Read { .. }));
    assert!(err.to_string().contains("/repo/3rdparty/jvm/o.json"));
}

#[test]
fn test_load_reads_through_filesystem() {
    let filesystem = MockFileSystemProvider::new().with_file("/repo/o.json", OVERRIDES);
    let table = OverrideTable::load(&filesystem, Path::new("/repo/o.json")).unwrap();
    assert_eq!(table.len(), 2);
}

#[test]
fn test_with_placements_builder() {
    let table = OverrideTable::new()
        .with_placements(TargetLabel::from("@maven//:t"), ["x.y"])
        .with_placements(TargetLabel::from("@maven//:t"), ["x.z"]);
    assert_eq!(
        table.placements(&TargetLabel::from("@maven//:t")).unwrap(),
        &[PackageName::new("x.y"), PackageName::new("x.z")]
    );
}
