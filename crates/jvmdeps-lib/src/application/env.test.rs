use super::*;

fn env_config(vars: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_pairs(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string())),
    )
    .unwrap()
}

#[test]
fn test_no_color_environment_variable() {
    let config = env_config(&[("NO_COLOR", "1")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Never);
}

#[test]
fn test_empty_no_color_is_ignored() {
    let config = env_config(&[("NO_COLOR", "")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_force_color_environment_variable() {
    let config = env_config(&[("FORCE_COLOR", "1")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_environment_variable_precedence() {
    let config = env_config(&[("CLICOLOR", "0"), ("NO_COLOR", "1"), ("FORCE_COLOR", "1")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Always);
}

#[test]
fn test_ci_disables_color() {
    let config = env_config(&[("CI", "true"), ("FORCE_COLOR", "1")]);
    assert_eq!(config.apply_color_config(ColorIntent::Always), ColorIntent::Never);
}

#[test]
fn test_invalid_force_color_values_ignored() {
    let config = env_config(&[("FORCE_COLOR", "invalid")]);
    assert_eq!(config.apply_color_config(ColorIntent::Auto), ColorIntent::Auto);
}

#[test]
fn test_unrelated_variables_leave_defaults() {
    let config = env_config(&[("HOME", "/home/dev")]);
    assert!(config.no_color.is_none());
    assert!(config.ci.is_none());
    assert_eq!(config.apply_color_config(ColorIntent::Never), ColorIntent::Never);
}
