//! Binary-level tests driving `jvmdeps` as a subprocess

use assert_cmd::Command;
use jvmdeps_tests::{TestEnvironment, fixtures};
use predicates::prelude::*;

fn jvmdeps(env: &TestEnvironment) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jvmdeps"));
    cmd.current_dir(env.root())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--workdir")
        .arg(env.root())
        .arg("--maven-query-output")
        .arg(fixtures::MAVEN_QUERY_FILE);
    cmd
}

#[test]
fn version_prints_package_version() {
    let env = TestEnvironment::new().unwrap();
    jvmdeps(&env)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "jvmdeps {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn generate_prints_resolved_rules() {
    let env = TestEnvironment::with_hello_repository().unwrap();
    jvmdeps(&env)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("# src/jvm/hello/BUILD.bazel"))
        .stdout(predicate::str::contains(fixtures::HELLO_BUILD));

    assert!(!env.exists("src/jvm/hello/BUILD.bazel"));
}

#[test]
fn generate_write_creates_build_files() {
    let env = TestEnvironment::with_hello_repository().unwrap();
    jvmdeps(&env)
        .args(["generate", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 BUILD files"));

    assert_eq!(
        env.read_file("src/jvm/hello/BUILD.bazel").unwrap(),
        fixtures::HELLO_BUILD
    );
}

#[test]
fn imports_lists_packages() {
    let env = TestEnvironment::with_hello_repository().unwrap();
    jvmdeps(&env)
        .args(["imports", "src/jvm/hello/Hello.java"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  com.fasterxml.jackson.core\n  com.fasterxml.jackson.databind\n  common.print\n  hello.util\n",
        ));
}

#[test]
fn imports_warns_about_static_imports() {
    let env = TestEnvironment::with_hello_repository().unwrap();
    jvmdeps(&env)
        .args(["imports", "src/jvm/common/print/Printer.java"])
        .assert()
        .success()
        .stderr(predicate::str::contains("static imports not currently supported"));
}

#[test]
fn thirdparty_dumps_index() {
    let env = TestEnvironment::with_hello_repository().unwrap();
    let output = jvmdeps(&env).arg("thirdparty").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json["com"]["fasterxml"]["jackson"]["databind"]["**"],
        "@maven//:com_fasterxml_jackson_core_jackson_databind"
    );
}

#[test]
fn unresolved_import_fails_with_message() {
    let env = TestEnvironment::with_hello_repository().unwrap();
    env.write_file("src/jvm/hello/Extra.java", "import org.example.Missing;\n")
        .unwrap();

    jvmdeps(&env)
        .args(["generate", "--write"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to find a BUILD target containing the \"org.example\" package",
        ));

    assert!(!env.exists("src/jvm/hello/BUILD.bazel"));
}

#[test]
fn missing_overrides_file_fails() {
    let env = TestEnvironment::new().unwrap();
    env.write_file(fixtures::MAVEN_QUERY_FILE, fixtures::MAVEN_QUERY_OUTPUT)
        .unwrap();

    jvmdeps(&env)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build 3rdparty map"));
}

#[test]
fn imports_requires_files() {
    let env = TestEnvironment::new().unwrap();
    jvmdeps(&env).arg("imports").assert().failure();
}
