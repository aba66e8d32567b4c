use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_generate_with_global_options() {
    let cli = Cli::try_parse_from([
        "jvmdeps",
        "--source-tree-prefix",
        "java/",
        "generate",
        "--write",
    ])
    .unwrap();

    assert_eq!(cli.config.source_tree_prefix, "java/");
    assert!(matches!(cli.command, Some(Commands::Generate { write: true })));
}

#[test]
fn test_parse_imports_requires_files() {
    assert!(Cli::try_parse_from(["jvmdeps", "imports"]).is_err());

    let cli = Cli::try_parse_from(["jvmdeps", "imports", "A.java", "B.java"]).unwrap();
    match cli.command {
        Some(Commands::Imports { files }) => {
            assert_eq!(files, vec![PathBuf::from("A.java"), PathBuf::from("B.java")]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_thirdparty_packages_optional() {
    let cli = Cli::try_parse_from(["jvmdeps", "thirdparty"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Thirdparty { ref packages }) if packages.is_empty()
    ));
}
