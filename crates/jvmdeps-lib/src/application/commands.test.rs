use super::*;
use crate::application::config::AppConfig;
use crate::application::session::LiveConfigProvider;
use crate::application::session_mocks::*;
use crate::jvm::ResolveError;
use std::path::Path;

type MockSession =
    CommandSession<MockFileSystemProvider, MockProcessProvider, LiveConfigProvider, MockOutputProvider>;

const QUERY_OUTPUT: &str = r#"jvm_import(
  name = "com_fasterxml_jackson_core_jackson_core",
  tags = ["maven_coordinates=com.fasterxml.jackson.core:jackson-core:2.13.3"],
)
jvm_import(
  name = "com_fasterxml_jackson_core_jackson_databind",
  tags = ["maven_coordinates=com.fasterxml.jackson.core:jackson-databind:2.13.3"],
)
jvm_import(
  name = "com_google_guava_guava",
  tags = ["maven_coordinates=com.google.guava:guava:31.1-jre"],
)
"#;

const OVERRIDES: &str = r#"{
  "@maven//:com_fasterxml_jackson_core_jackson_databind": ["com.fasterxml.jackson.databind"],
  "@maven//:com_google_guava_guava": ["com.google.common"]
}"#;

const HELLO: &str = "package hello;

import com.fasterxml.jackson.core.JsonProcessingException;
import com.fasterxml.jackson.databind.ObjectMapper;
import common.print.Printer;
import hello.util.HelloUtil;

public class Hello {}
";

const HELLO_UTIL: &str = "package hello.util;

import com.google.common.base.Strings;
import common.print.Printer;

public class HelloUtil {}
";

const PRINTER: &str = "package common.print;

public class Printer {}
";

fn repository() -> MockFileSystemProvider {
    MockFileSystemProvider::new()
        .with_file("/repo/maven.query", QUERY_OUTPUT)
        .with_file("/repo/3rdparty/jvm/thirdparty_map_overrides.json", OVERRIDES)
        .with_file("/repo/src/jvm/hello/Hello.java", HELLO)
        .with_file("/repo/src/jvm/hello/util/HelloUtil.java", HELLO_UTIL)
        .with_file("/repo/src/jvm/common/print/Printer.java", PRINTER)
}

fn session(filesystem: MockFileSystemProvider) -> MockSession {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        maven_query_output: Some(PathBuf::from("maven.query")),
        ..AppConfig::default()
    };
    CommandSession::new_with_providers(
        filesystem,
        MockProcessProvider::new(),
        LiveConfigProvider::new(config),
        MockOutputProvider::new(),
    )
}

fn deps_of<'a>(rules: &'a [JavaLibraryRule], name: &str) -> Option<&'a Vec<String>> {
    rules
        .iter()
        .find(|rule| rule.name == name)
        .and_then(|rule| rule.deps.as_ref())
}

fn written_file(session: &MockSession, path: &str) -> Option<String> {
    session.filesystem_provider().file(Path::new(path))
}

mod generate_repository_tests {
    use super::*;

    #[test]
    fn it_resolves_local_and_third_party_imports() {
        let session = session(repository());
        let resolver = load_resolver(&session).unwrap();

        let rules = generate_repository(&session, &resolver).unwrap();

        let names: Vec<&str> = rules.iter().map(|rule| rule.name.as_str()).collect();
        assert_eq!(names, vec!["print", "util", "hello"]);

        assert_eq!(deps_of(&rules, "print"), None);
        assert_eq!(
            deps_of(&rules, "util").unwrap(),
            &vec![
                "//src/jvm/common/print".to_string(),
                "@maven//:com_google_guava_guava".to_string(),
            ]
        );
        assert_eq!(
            deps_of(&rules, "hello").unwrap(),
            &vec![
                "//src/jvm/common/print".to_string(),
                "//src/jvm/hello/util".to_string(),
                "@maven//:com_fasterxml_jackson_core_jackson_core".to_string(),
                "@maven//:com_fasterxml_jackson_core_jackson_databind".to_string(),
            ]
        );
    }

    #[test]
    fn it_only_sees_rules_of_earlier_directories() {
        // common/print is processed before hello/util, so this import cannot resolve
        let filesystem = repository().with_file(
            "/repo/src/jvm/common/print/Printer.java",
            "package common.print;\n\nimport hello.util.HelloUtil;\n",
        );
        let session = session(filesystem);
        let resolver = load_resolver(&session).unwrap();

        let err = generate_repository(&session, &resolver).unwrap_err();
        assert!(err.to_string().contains("src/jvm/common/print"));
        assert_eq!(
            err.downcast_ref::<ResolveError>(),
            Some(&ResolveError::Unresolved {
                package: PackageName::new("hello.util")
            })
        );
    }

    #[test]
    fn it_reports_ambiguous_local_packages() {
        let filesystem = repository()
            .with_file("/repo/src/jvm/common/print/Printer.java", PRINTER)
            .with_file("/repo/lib/src/jvm/common/print/Printer.java", PRINTER);
        let session = session(filesystem);
        let resolver = load_resolver(&session).unwrap();

        let err = generate_repository(&session, &resolver).unwrap_err();
        match err.downcast_ref::<ResolveError>() {
            Some(ResolveError::Ambiguous { package, candidates }) => {
                assert_eq!(package.as_str(), "common.print");
                assert_eq!(
                    candidates,
                    &vec![
                        "lib/src/jvm/common/print:print".to_string(),
                        "src/jvm/common/print:print".to_string(),
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn it_fails_on_unknown_third_party_package() {
        let filesystem = repository().with_file(
            "/repo/src/jvm/common/print/Printer.java",
            "package common.print;\n\nimport org.apache.commons.lang3.StringUtils;\n",
        );
        let session = session(filesystem);
        let resolver = load_resolver(&session).unwrap();

        assert!(generate_repository(&session, &resolver).is_err());
    }
}

mod handle_generate_tests {
    use super::*;

    #[test]
    fn it_prints_rules_without_touching_build_files() {
        let session = session(repository());

        execute_command_with_session(Commands::Generate { write: false }, &session).unwrap();

        let output = session.output_provider().text();
        assert!(output.contains("# src/jvm/hello/BUILD.bazel\nload(\"@rules_java//java:defs.bzl\", \"java_library\")"));
        assert!(output.contains("    name = \"hello\",\n    srcs = [\"Hello.java\"],"));
        assert!(output.contains("        \"//src/jvm/hello/util\",\n"));
        assert!(written_file(&session, "/repo/src/jvm/hello/BUILD.bazel").is_none());
    }

    #[test]
    fn it_writes_build_files() {
        let session = session(repository());

        execute_command_with_session(Commands::Generate { write: true }, &session).unwrap();

        let written = written_file(&session, "/repo/src/jvm/common/print/BUILD.bazel").unwrap();
        assert_eq!(
            written,
            "load(\"@rules_java//java:defs.bzl\", \"java_library\")\n\njava_library(\n    name = \"print\",\n    srcs = [\"Printer.java\"],\n    visibility = [\"//visibility:public\"],\n)\n"
        );
        assert_eq!(session.output_provider().text(), "Wrote 3 BUILD files");
    }

    #[test]
    fn it_writes_nothing_when_any_directory_fails() {
        let filesystem = repository().with_file(
            "/repo/src/jvm/hello/Hello.java",
            "package hello;\n\nimport net.unknown.Thing;\n",
        );
        let session = session(filesystem);

        assert!(execute_command_with_session(Commands::Generate { write: true }, &session).is_err());
        assert!(
            written_file(&session, "/repo/src/jvm/common/print/BUILD.bazel").is_none()
        );
        assert!(session.output_provider().text().is_empty());
    }

    #[test]
    fn it_reports_how_many_files_were_written_when_a_write_fails() {
        let filesystem =
            repository().with_unwritable_file("/repo/src/jvm/hello/util/BUILD.bazel");
        let session = session(filesystem);

        let err = execute_command_with_session(Commands::Generate { write: true }, &session)
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Wrote 1 of 3 BUILD files before failing"));
        assert!(message.contains("/repo/src/jvm/hello/util/BUILD.bazel"));

        assert!(written_file(&session, "/repo/src/jvm/common/print/BUILD.bazel").is_some());
        assert!(written_file(&session, "/repo/src/jvm/hello/BUILD.bazel").is_none());
        assert!(session.output_provider().text().is_empty());
    }

    #[test]
    fn it_aborts_before_generation_when_overrides_are_missing() {
        let filesystem = MockFileSystemProvider::new()
            .with_file("/repo/maven.query", QUERY_OUTPUT)
            .with_file("/repo/src/jvm/hello/Hello.java", HELLO);
        let session = session(filesystem);

        let err = execute_command_with_session(Commands::Generate { write: false }, &session)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to build 3rdparty map"));
        assert!(session.output_provider().text().is_empty());
    }
}

mod handle_thirdparty_tests {
    use super::*;

    #[test]
    fn it_dumps_the_index_as_json() {
        let session = session(repository());

        execute_command_with_session(Commands::Thirdparty { packages: vec![] }, &session).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&session.output_provider().text()).unwrap();
        assert_eq!(
            json["com"]["google"]["common"]["**"],
            "@maven//:com_google_guava_guava"
        );
        assert_eq!(
            json["com"]["fasterxml"]["jackson"]["core"]["**"],
            "@maven//:com_fasterxml_jackson_core_jackson_core"
        );
    }

    #[test]
    fn it_looks_up_packages() {
        let session = session(repository());

        execute_command_with_session(
            Commands::Thirdparty {
                packages: vec!["com.google.common.collect".to_string()],
            },
            &session,
        )
        .unwrap();

        assert_eq!(
            session.output_provider().text(),
            "com.google.common.collect @maven//:com_google_guava_guava"
        );
    }

    #[test]
    fn it_fails_for_unknown_packages() {
        let session = session(repository());
        let result = execute_command_with_session(
            Commands::Thirdparty {
                packages: vec!["org.example".to_string()],
            },
            &session,
        );
        assert!(result.is_err());
    }

    #[test]
    fn it_runs_bazel_query_when_no_capture_is_configured() {
        let config = AppConfig {
            workdir: Some(PathBuf::from("/repo")),
            ..AppConfig::default()
        };
        let process = MockProcessProvider::new().with_result(
            "bazel".to_string(),
            crate::jvm::metadata::query_args("maven"),
            Ok(crate::application::session::ProcessOutput {
                stdout: QUERY_OUTPUT.to_string(),
                stderr: String::new(),
                success: true,
            }),
        );
        let session = CommandSession::new_with_providers(
            repository(),
            process,
            LiveConfigProvider::new(config),
            MockOutputProvider::new(),
        );

        execute_command_with_session(
            Commands::Thirdparty {
                packages: vec!["com.fasterxml.jackson.databind".to_string()],
            },
            &session,
        )
        .unwrap();

        assert_eq!(session.process_provider().get_calls().len(), 1);
        assert_eq!(
            session.output_provider().text(),
            "com.fasterxml.jackson.databind @maven//:com_fasterxml_jackson_core_jackson_databind"
        );
    }
}

mod handle_imports_tests {
    use super::*;

    #[test]
    fn it_lists_packages_per_file() {
        let session = session(repository());

        execute_command_with_session(
            Commands::Imports {
                files: vec![
                    PathBuf::from("/repo/src/jvm/hello/util/HelloUtil.java"),
                    PathBuf::from("/repo/src/jvm/common/print/Printer.java"),
                ],
            },
            &session,
        )
        .unwrap();

        assert_eq!(
            session.output_provider().text(),
            "/repo/src/jvm/hello/util/HelloUtil.java\n  com.google.common.base\n  common.print\n/repo/src/jvm/common/print/Printer.java"
        );
    }

    #[test]
    fn it_needs_no_thirdparty_metadata() {
        let filesystem = MockFileSystemProvider::new().with_file("/tmp/A.java", "import a.b.C;\n");
        let session = session(filesystem);

        execute_command_with_session(
            Commands::Imports {
                files: vec![PathBuf::from("/tmp/A.java")],
            },
            &session,
        )
        .unwrap();
        assert_eq!(session.output_provider().text(), "/tmp/A.java\n  a.b");
    }

    #[test]
    fn it_fails_for_missing_files() {
        let session = session(MockFileSystemProvider::new());
        let err = execute_command_with_session(
            Commands::Imports {
                files: vec![PathBuf::from("/missing/A.java")],
            },
            &session,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/missing/A.java"));
    }
}

mod handle_version_tests {
    use super::*;

    #[test]
    fn it_displays_version_information() {
        let session = session(MockFileSystemProvider::new());

        execute_command_with_session(Commands::Version, &session).unwrap();

        let output = session.output_provider().text();
        assert!(output.starts_with(&format!("jvmdeps {}", env!("CARGO_PKG_VERSION"))));
    }
}
