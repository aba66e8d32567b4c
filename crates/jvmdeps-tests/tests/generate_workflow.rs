//! E2E tests for the generate and thirdparty commands
//!
//! These run against a real temporary repository with the live filesystem
//! provider. The metadata query is either read from a captured file or
//! served by a mock `bazel` script on a restricted PATH.

use anyhow::Result;
use jvmdeps_lib::application::cli::Commands;
use jvmdeps_lib::application::commands::{
    execute_command_with_session, generate_repository, load_resolver,
};
use jvmdeps_lib::jvm::ResolveError;
use jvmdeps_tests::fixtures;
use jvmdeps_tests::{MockBehavior, TestEnvironment};

#[test]
fn e2e_generate_writes_build_files() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    let session = env.session(env.app_config());

    execute_command_with_session(Commands::Generate { write: true }, &session)?;

    assert_eq!(env.read_file("src/jvm/hello/BUILD.bazel")?, fixtures::HELLO_BUILD);
    assert!(env.exists("src/jvm/hello/util/BUILD.bazel"));
    assert!(env.exists("src/jvm/common/print/BUILD.bazel"));
    assert!(!env.exists("src/jvm/BUILD.bazel"));
    assert!(!env.exists("3rdparty/jvm/BUILD.bazel"));
    assert_eq!(session.output_provider().text(), "Wrote 3 BUILD files");
    Ok(())
}

#[test]
fn e2e_generate_prints_without_writing() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    let session = env.session(env.app_config());

    execute_command_with_session(Commands::Generate { write: false }, &session)?;

    let output = session.output_provider().text();
    assert!(output.contains(&format!("# src/jvm/hello/BUILD.bazel\n{}", fixtures::HELLO_BUILD)));
    assert!(!env.exists("src/jvm/hello/BUILD.bazel"));
    Ok(())
}

#[test]
fn e2e_static_imports_do_not_become_deps() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    let session = env.session(env.app_config());
    let resolver = load_resolver(&session)?;

    let rules = generate_repository(&session, &resolver)?;
    let printer = rules
        .iter()
        .find(|rule| rule.name == "print")
        .expect("print rule generated");
    assert!(printer.imports.is_empty());
    assert_eq!(printer.deps, None);
    Ok(())
}

#[test]
fn e2e_ignores_bazel_output_directories() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    env.write_file("bazel-out/gen/Generated.java", "import does.not.Exist;\n")?;
    env.write_file(".cache/Cached.java", "import does.not.Exist;\n")?;
    let session = env.session(env.app_config());
    let resolver = load_resolver(&session)?;

    let rules = generate_repository(&session, &resolver)?;
    assert_eq!(rules.len(), 3);
    Ok(())
}

#[test]
fn e2e_custom_source_tree_prefix() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_file(fixtures::MAVEN_QUERY_FILE, fixtures::MAVEN_QUERY_OUTPUT)?;
    env.write_file("3rdparty/jvm/thirdparty_map_overrides.json", fixtures::OVERRIDES_JSON)?;
    env.write_file("java/common/print/Printer.java", fixtures::PRINTER_JAVA)?;
    env.write_file("java/hello/util/HelloUtil.java", fixtures::HELLO_UTIL_JAVA)?;

    let mut config = env.app_config();
    config.source_tree_prefix = "java/".to_string();
    let session = env.session(config);
    let resolver = load_resolver(&session)?;

    let rules = generate_repository(&session, &resolver)?;
    let util = rules.iter().find(|rule| rule.name == "util").expect("util rule generated");
    assert_eq!(util.package.as_str(), "hello.util");
    assert_eq!(
        util.deps.as_deref(),
        Some(&["//java/common/print".to_string(), "@maven//:com_google_guava_guava".to_string()][..])
    );
    Ok(())
}

#[test]
fn e2e_unresolved_import_aborts_without_writing() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    env.write_file(
        "src/jvm/hello/Extra.java",
        "package hello;\n\nimport org.apache.commons.lang3.StringUtils;\n",
    )?;
    let session = env.session(env.app_config());

    let err = execute_command_with_session(Commands::Generate { write: true }, &session)
        .expect_err("unresolvable import must fail");
    assert_eq!(
        err.downcast_ref::<ResolveError>().map(ToString::to_string),
        Some("failed to find a BUILD target containing the \"org.apache.commons.lang3\" package".to_string())
    );
    assert!(!env.exists("src/jvm/common/print/BUILD.bazel"));
    Ok(())
}

#[test]
fn e2e_malformed_override_file_aborts() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    env.write_file("3rdparty/jvm/thirdparty_map_overrides.json", "{ not json")?;
    let session = env.session(env.app_config());

    let err = execute_command_with_session(Commands::Generate { write: false }, &session)
        .expect_err("malformed overrides must fail");
    assert!(format!("{:#}", err).contains("thirdparty_map_overrides.json"));
    assert!(session.output_provider().text().is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn e2e_thirdparty_lookup_runs_mock_bazel() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_file("3rdparty/jvm/thirdparty_map_overrides.json", fixtures::OVERRIDES_JSON)?;
    env.add_mock_executable(
        "bazel",
        MockBehavior::SucceedWithOutput {
            stdout: fixtures::MAVEN_QUERY_OUTPUT.to_string(),
        },
    )?;
    let session = env.session(env.app_config());

    execute_command_with_session(
        Commands::Thirdparty {
            packages: vec!["com.google.common.collect".to_string()],
        },
        &session,
    )?;

    assert_eq!(
        session.output_provider().text(),
        "com.google.common.collect @maven//:com_google_guava_guava"
    );
    assert_eq!(
        env.get_mock_calls("bazel")?,
        vec!["query kind(jvm_import, @maven//:all) --output=build"]
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn e2e_failed_bazel_query_reports_stderr() -> Result<()> {
    let env = TestEnvironment::with_hello_repository()?;
    std::fs::remove_file(env.root().join(fixtures::MAVEN_QUERY_FILE))?;
    env.add_mock_executable(
        "bazel",
        MockBehavior::AlwaysFail {
            stderr: "ERROR: no such package '@maven//'".to_string(),
        },
    )?;
    let session = env.session(env.app_config());

    let err = execute_command_with_session(Commands::Generate { write: false }, &session)
        .expect_err("failed query must abort");
    let message = format!("{:#}", err);
    assert!(message.contains("ERROR: no such package '@maven//'"));
    assert!(message.contains("kind(jvm_import, @maven//:all)"));
    Ok(())
}
