use super::*;

macro_rules! test_enum_completeness {
    ($enum_type:ty, $test_name:ident) => {
        #[test]
        fn $test_name() {
            for variant in <$enum_type>::value_variants() {
                let possible_value = variant
                    .to_possible_value()
                    .expect("PossibleValue should exist for all variants");

                let primary_name = possible_value.get_name();
                let parsed: Result<$enum_type, _> = primary_name.parse();
                assert_eq!(
                    parsed.unwrap(),
                    *variant,
                    "Round-trip should preserve variant"
                );
            }
        }
    };
}

test_enum_completeness!(LogFormat, test_log_format_completeness);
test_enum_completeness!(LogOutput, test_log_output_completeness);
test_enum_completeness!(ColorIntent, test_color_intent_completeness);

#[test]
fn test_log_format_aliases() {
    let mappings = [
        ("text", LogFormat::Text),
        ("txt", LogFormat::Text),
        ("PLAIN", LogFormat::Text),
        ("json", LogFormat::Json),
        ("yml", LogFormat::Yaml),
        ("pretty", LogFormat::Yaml),
    ];

    for (input, expected) in mappings {
        assert_eq!(input.parse::<LogFormat>().unwrap(), expected, "input {input}");
    }
}

#[test]
fn test_invalid_values_report_parse_error() {
    let err = "xml".parse::<LogFormat>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "xml");
            assert_eq!(reason, "invalid log format");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!("sometimes".parse::<ColorIntent>().is_err());
    assert!("stdin".parse::<LogOutput>().is_err());
}

#[test]
fn test_log_level_from_verbosity() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
}

#[test]
fn test_log_level_filter_directives() {
    assert_eq!(LogLevel::Warning.as_filter_directive(), "warn");
    assert_eq!(LogLevel::Trace.as_filter_directive(), "trace");
    assert!(LogLevel::Error < LogLevel::Debug);
}

#[test]
fn test_json_logs_never_use_ansi() {
    let config = LoggerConfig {
        level: LogLevel::Info,
        format: LogFormat::Json,
        output: LogOutput::Stderr,
        color: ColorIntent::Always,
    };
    assert!(!config.use_ansi());

    let config = LoggerConfig {
        format: LogFormat::Text,
        ..config
    };
    assert!(config.use_ansi());

    let config = LoggerConfig {
        color: ColorIntent::Never,
        ..config
    };
    assert!(!config.use_ansi());
}
