use clap::Parser;
use jvmdeps_lib::application::cli::{Cli, CliConfig};
use jvmdeps_lib::application::config::AppConfig;
use jvmdeps_lib::application::env::EnvironmentConfig;
use jvmdeps_lib::primitives::{ColorIntent, ConfigError};
use std::path::PathBuf;

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.source_tree_prefix, "src/jvm/");
    assert_eq!(
        config.overrides_file,
        PathBuf::from("3rdparty/jvm/thirdparty_map_overrides.json")
    );
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_cli_values_flow_into_finalized_config() {
    let workdir = tempfile::TempDir::new().unwrap();
    let cli = Cli::try_parse_from([
        "jvmdeps",
        "--workdir",
        workdir.path().to_str().unwrap(),
        "--source-tree-prefix",
        "java",
        "--maven-repository",
        "third_party_jvm",
        "--color",
        "never",
        "version",
    ])
    .unwrap();

    let config = CliConfig::from_cli(cli).unwrap().app_config;
    assert_eq!(config.source_tree_prefix, "java/");
    assert_eq!(config.maven_repository, "third_party_jvm");
    assert_eq!(config.color, ColorIntent::Never);
    assert_eq!(
        config.overrides_path(),
        workdir.path().join("3rdparty/jvm/thirdparty_map_overrides.json")
    );
}

#[test]
fn test_environment_color_applies_only_to_auto() {
    let workdir = tempfile::TempDir::new().unwrap();
    let env = EnvironmentConfig::from_pairs([("NO_COLOR".to_string(), "1".to_string())]).unwrap();

    let auto = AppConfig {
        workdir: Some(workdir.path().to_path_buf()),
        ..AppConfig::default()
    };
    let forced = AppConfig {
        color: ColorIntent::Always,
        ..auto.clone()
    };

    assert_eq!(
        AppConfig::finalize_with_env(auto, &env).unwrap().color,
        ColorIntent::Never
    );
    assert_eq!(
        AppConfig::finalize_with_env(forced, &env).unwrap().color,
        ColorIntent::Always
    );
}

#[test]
fn test_missing_workdir_is_rejected() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/definitely/not/a/jvmdeps/repository")),
        ..AppConfig::default()
    };

    assert!(matches!(
        AppConfig::finalize_with_env(config, &EnvironmentConfig::default()),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}
