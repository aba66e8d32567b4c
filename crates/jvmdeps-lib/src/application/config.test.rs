use super::*;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 1);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.source_tree_prefix, "src/jvm/");
    assert_eq!(config.maven_repository, "maven");
    assert_eq!(config.bazel, "bazel");
    assert_eq!(config.visibility, "//visibility:public");
    assert_eq!(
        config.overrides_file,
        PathBuf::from("3rdparty/jvm/thirdparty_map_overrides.json")
    );
    assert!(config.maven_query_output.is_none());
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let parsed = AppConfig::try_parse_from(["jvmdeps"]).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(parsed.source_tree_prefix, defaults.source_tree_prefix);
    assert_eq!(parsed.overrides_file, defaults.overrides_file);
    assert_eq!(parsed.log_level, defaults.log_level);
    assert_eq!(parsed.log_format, defaults.log_format);
    assert_eq!(parsed.color, defaults.color);
}

#[test]
fn test_clap_overrides() {
    let parsed = AppConfig::try_parse_from([
        "jvmdeps",
        "--source-tree-prefix",
        "java",
        "--maven-repository",
        "third_party_jvm",
        "--maven-query-output",
        "query.txt",
        "--log-format",
        "json",
        "--color",
        "never",
    ])
    .unwrap();

    assert_eq!(parsed.source_tree_prefix, "java");
    assert_eq!(parsed.maven_repository, "third_party_jvm");
    assert_eq!(parsed.maven_query_output, Some(PathBuf::from("query.txt")));
    assert_eq!(parsed.log_format, LogFormat::Json);
    assert_eq!(parsed.color, ColorIntent::Never);
}

#[test]
fn test_validate_normalizes_source_tree_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(temp_dir.path().to_path_buf()),
        source_tree_prefix: "java/src".to_string(),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.source_tree_prefix, "java/src/");
}

#[test]
fn test_validate_rejects_missing_workdir() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(temp_dir.path().join("does-not-exist")),
        ..AppConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidWorkDir { .. }));
}

#[test]
fn test_paths_resolve_against_repository_root() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/repo")),
        maven_query_output: Some(PathBuf::from("out/query.txt")),
        ..AppConfig::default()
    };

    assert_eq!(
        config.overrides_path(),
        Path::new("/repo/3rdparty/jvm/thirdparty_map_overrides.json")
    );
    assert_eq!(
        config.maven_query_output_path(),
        Some(PathBuf::from("/repo/out/query.txt"))
    );
}

#[test]
fn test_to_logger_config() {
    let config = AppConfig {
        log_level: 3,
        log_output: LogOutput::Stdout,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.output, LogOutput::Stdout);
    assert_eq!(logger_config.format, LogFormat::Text);
}
