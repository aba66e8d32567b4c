use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn workdir_config(temp_dir: &TempDir) -> AppConfig {
    AppConfig {
        workdir: Some(temp_dir.path().to_path_buf()),
        ..AppConfig::default()
    }
}

#[test]
fn test_finalize_applies_environment_color() {
    let temp_dir = TempDir::new().unwrap();
    let env_config = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::finalize_with_env(workdir_config(&temp_dir), &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_finalize_keeps_explicit_color() {
    let temp_dir = TempDir::new().unwrap();
    let env_config = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let config = AppConfig {
        color: ColorIntent::Always,
        ..workdir_config(&temp_dir)
    };

    let config = AppConfig::finalize_with_env(config, &env_config).unwrap();
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_finalize_validates_workdir() {
    let env_config = EnvironmentConfig::default();
    let config = AppConfig {
        workdir: Some(PathBuf::from("/definitely/not/a/repository/root")),
        ..AppConfig::default()
    };

    assert!(matches!(
        AppConfig::finalize_with_env(config, &env_config),
        Err(ConfigError::InvalidWorkDir { .. })
    ));
}
