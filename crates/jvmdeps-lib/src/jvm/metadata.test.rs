use super::*;
use crate::application::config::AppConfig;
use crate::application::session::{CommandSession, LiveConfigProvider, ProcessOutput};
use crate::application::session_mocks::{
    MockFileSystemProvider, MockOutputProvider, MockProcessProvider,
};
use std::path::Path;

const QUERY_OUTPUT: &str = r#"# /home/dev/.cache/bazel/external/maven/BUILD:12:11
jvm_import(
  name = "com_fasterxml_jackson_core_jackson_core",
  tags = ["maven_coordinates=com.fasterxml.jackson.core:jackson-core:2.13.3"],
  jars = ["@maven//:v1/https/repo1.maven.org/maven2/com/fasterxml/jackson/core/jackson-core/2.13.3/jackson-core-2.13.3.jar"],
  deps = [],
)
# /home/dev/.cache/bazel/external/maven/BUILD:20:11
jvm_import(
  name = "com_google_guava_guava",
  tags = ["maven_coordinates=com.google.guava:guava:31.1-jre"],
  jars = ["@maven//:v1/https/repo1.maven.org/maven2/com/google/guava/guava/31.1-jre/guava-31.1-jre.jar"],
  deps = ["@maven//:com_google_guava_failureaccess"],
)
"#;

#[test]
fn test_parse_query_output() {
    let artifacts = parse_query_output(QUERY_OUTPUT, "maven").unwrap();
    assert_eq!(artifacts.len(), 2);

    assert_eq!(
        artifacts[0].target.as_str(),
        "@maven//:com_fasterxml_jackson_core_jackson_core"
    );
    assert_eq!(artifacts[0].coordinate_group(), "com.fasterxml.jackson.core");
    assert_eq!(artifacts[1].target.as_str(), "@maven//:com_google_guava_guava");
    assert_eq!(artifacts[1].coordinates, "com.google.guava:guava:31.1-jre");
}

#[test]
fn test_parse_uses_configured_repository() {
    let artifacts = parse_query_output(QUERY_OUTPUT, "third_party_jvm").unwrap();
    assert_eq!(
        artifacts[1].target.as_str(),
        "@third_party_jvm//:com_google_guava_guava"
    );
}

#[test]
fn test_empty_output_yields_no_artifacts() {
    assert!(parse_query_output("", "maven").unwrap().is_empty());
}

#[test]
fn test_block_without_coordinates_is_fatal() {
    let output = "jvm_import(\n  name = \"orphan\",\n)\n";
    let err = parse_query_output(output, "maven").unwrap_err();
    match err {
        MetadataError::IncompleteBlock {
            line_number,
            target,
            coordinates,
        } => {
            assert_eq!(line_number, 3);
            assert_eq!(target.as_deref(), Some("@maven//:orphan"));
            assert!(coordinates.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_block_without_name_is_fatal() {
    let output = "jvm_import(\n  tags = [\"maven_coordinates=a.b:c:1\"],\n)\n";
    assert!(matches!(
        parse_query_output(output, "maven"),
        Err(MetadataError::IncompleteBlock { target: None, .. })
    ));
}

#[test]
fn test_tags_without_coordinates_is_fatal() {
    let output = "jvm_import(\n  name = \"x\",\n  tags = [\"manual\"],\n)\n";
    assert!(matches!(
        parse_query_output(output, "maven"),
        Err(MetadataError::MissingCoordinatesTag { line_number: 3, .. })
    ));
}

#[test]
fn test_coordinates_without_colon_are_fatal() {
    let output = "jvm_import(\n  name = \"x\",\n  tags = [\"maven_coordinates=nocolon\"],\n)\n";
    assert!(matches!(
        parse_query_output(output, "maven"),
        Err(MetadataError::MalformedCoordinates { .. })
    ));
}

#[test]
fn test_query_args() {
    assert_eq!(
        query_args("maven"),
        vec!["query", "kind(jvm_import, @maven//:all)", "--output=build"]
    );
}

fn session_with(
    config: AppConfig,
    filesystem: MockFileSystemProvider,
    process: MockProcessProvider,
) -> CommandSession<MockFileSystemProvider, MockProcessProvider, LiveConfigProvider, MockOutputProvider>
{
    CommandSession::new_with_providers(
        filesystem,
        process,
        LiveConfigProvider::new(config),
        MockOutputProvider::new(),
    )
}

#[test]
fn test_load_artifacts_runs_bazel_query_in_repository_root() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        ..AppConfig::default()
    };
    let process = MockProcessProvider::new().with_result(
        "bazel".to_string(),
        query_args("maven"),
        Ok(ProcessOutput {
            stdout: QUERY_OUTPUT.to_string(),
            stderr: String::new(),
            success: true,
        }),
    );
    let session = session_with(config, MockFileSystemProvider::new(), process);

    let artifacts = load_artifacts(&session).unwrap();
    assert_eq!(artifacts.len(), 2);

    let calls = session.process_provider().get_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].working_dir, Path::new("/repo"));
}

#[test]
fn test_load_artifacts_reports_failed_query() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        ..AppConfig::default()
    };
    let process = MockProcessProvider::new().with_result(
        "bazel".to_string(),
        query_args("maven"),
        Ok(ProcessOutput {
            stdout: String::new(),
            stderr: "ERROR: no such package '@maven//'\n".to_string(),
            success: false,
        }),
    );
    let session = session_with(config, MockFileSystemProvider::new(), process);

    match load_artifacts(&session).unwrap_err() {
        MetadataError::Query { command, reason } => {
            assert!(command.starts_with("bazel query"));
            assert_eq!(reason, "ERROR: no such package '@maven//'");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_load_artifacts_prefers_captured_output() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        maven_query_output: Some(PathBuf::from("maven.query")),
        ..AppConfig::default()
    };
    let filesystem = MockFileSystemProvider::new().with_file("/repo/maven.query", QUERY_OUTPUT);
    let session = session_with(config, filesystem, MockProcessProvider::new());

    let artifacts = load_artifacts(&session).unwrap();
    assert_eq!(artifacts.len(), 2);
    assert!(session.process_provider().get_calls().is_empty());
}

#[test]
fn test_load_artifacts_missing_captured_output() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        maven_query_output: Some(PathBuf::from("missing.query")),
        ..AppConfig::default()
    };
    let session = session_with(config, MockFileSystemProvider::new(), MockProcessProvider::new());

    assert!(matches!(
        load_artifacts(&session),
        Err(MetadataError::Read { .. })
    ));
}
