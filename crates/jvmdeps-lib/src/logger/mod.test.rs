use super::*;

#[test]
fn test_default_filter_targets_our_crates() {
    let filter = Logger::default_filter(LogLevel::Debug).to_string().to_lowercase();
    assert!(filter.contains("jvmdeps_lib=debug"), "{filter}");
    assert!(filter.contains("jvmdeps=debug"), "{filter}");
}

#[test]
fn test_default_filter_tracks_level() {
    let filter = Logger::default_filter(LogLevel::Warning).to_string().to_lowercase();
    assert!(filter.contains("jvmdeps_lib=warn"), "{filter}");
}

#[test]
fn test_global_consistent_with_initialized_flag() {
    // Other tests may have initialized the logger; the two views must agree
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
