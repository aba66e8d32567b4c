use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

const OPTIONS: GenerateOptions<'static> = GenerateOptions {
    source_tree_prefix: "src/jvm/",
    visibility: "//visibility:public",
};

fn listing(files: &[&str]) -> DirectoryListing {
    DirectoryListing {
        regular_files: files.iter().map(|f| f.to_string()).collect(),
        subdirectories: Vec::new(),
    }
}

#[test]
fn test_rule_unions_imports_of_all_sources() {
    let filesystem = MockFileSystemProvider::new()
        .with_file(
            "/repo/src/jvm/hello/Hello.java",
            "package hello;\n\nimport common.print.Printer;\nimport hello.util.HelloUtil;\n",
        )
        .with_file(
            "/repo/src/jvm/hello/Greeter.java",
            "package hello;\n\nimport common.print.Printer;\nimport com.google.common.base.Strings;\n",
        );

    let rule = generate_rule(
        &filesystem,
        Path::new("/repo/src/jvm/hello"),
        "src/jvm/hello",
        &listing(&["Greeter.java", "Hello.java", "README.md"]),
        &OPTIONS,
    )
    .unwrap();

    assert_eq!(rule.name, "hello");
    assert_eq!(rule.package.as_str(), "hello");
    assert_eq!(rule.srcs, vec!["Greeter.java", "Hello.java"]);
    assert_eq!(rule.visibility, vec!["//visibility:public"]);
    let imports: Vec<&str> = rule.imports.iter().map(PackageName::as_str).collect();
    assert_eq!(
        imports,
        vec!["com.google.common.base", "common.print", "hello.util"]
    );
    assert_eq!(rule.deps, None);
}

#[test]
fn test_directory_without_java_sources_yields_no_rule() {
    let filesystem = MockFileSystemProvider::new();
    let rule = generate_rule(
        &filesystem,
        Path::new("/repo/docs"),
        "docs",
        &listing(&["index.md", "Hello.java.orig"]),
        &OPTIONS,
    );
    assert!(rule.is_none());
}

#[test]
fn test_unreadable_source_still_listed_without_imports() {
    let filesystem = MockFileSystemProvider::new()
        .with_unreadable_file("/repo/src/jvm/a/Broken.java")
        .with_file("/repo/src/jvm/a/Ok.java", "import x.y.Z;\n");

    let rule = generate_rule(
        &filesystem,
        Path::new("/repo/src/jvm/a"),
        "src/jvm/a",
        &listing(&["Broken.java", "Ok.java"]),
        &OPTIONS,
    )
    .unwrap();

    assert_eq!(rule.srcs, vec!["Broken.java", "Ok.java"]);
    assert_eq!(rule.imports, BTreeSet::from([PackageName::new("x.y")]));
}

#[test]
fn test_nested_directory_declares_dotted_package() {
    let filesystem = MockFileSystemProvider::new().with_file("/repo/src/jvm/common/print/Printer.java", "");
    let rule = generate_rule(
        &filesystem,
        Path::new("/repo/src/jvm/common/print"),
        "src/jvm/common/print",
        &listing(&["Printer.java"]),
        &OPTIONS,
    )
    .unwrap();

    assert_eq!(rule.name, "print");
    assert_eq!(rule.package.as_str(), "common.print");
    assert_eq!(rule.label().to_string(), "src/jvm/common/print:print");
}

#[test]
fn test_root_rule_named_after_directory() {
    let filesystem = MockFileSystemProvider::new().with_file("/work/myrepo/Main.java", "");
    let rule = generate_rule(
        &filesystem,
        Path::new("/work/myrepo"),
        "",
        &listing(&["Main.java"]),
        &OPTIONS,
    )
    .unwrap();
    assert_eq!(rule.name, "myrepo");
    assert_eq!(rule.package_dir, "");
}

#[test]
fn test_walk_is_post_order() {
    let filesystem = MockFileSystemProvider::new()
        .with_file("/repo/WORKSPACE", "")
        .with_file("/repo/src/jvm/hello/Hello.java", "")
        .with_file("/repo/src/jvm/hello/util/HelloUtil.java", "")
        .with_file("/repo/src/jvm/common/print/Printer.java", "");

    let order: Vec<String> = walk_post_order(&filesystem, Path::new("/repo"))
        .unwrap()
        .into_iter()
        .map(|(rel, _)| rel)
        .collect();

    assert_eq!(
        order,
        vec![
            "src/jvm/common/print",
            "src/jvm/common",
            "src/jvm/hello/util",
            "src/jvm/hello",
            "src/jvm",
            "src",
            "",
        ]
    );
}

#[test]
fn test_walk_returns_listings() {
    let filesystem = MockFileSystemProvider::new()
        .with_file("/repo/src/jvm/hello/Hello.java", "")
        .with_file("/repo/src/jvm/hello/util/HelloUtil.java", "");

    let walk = walk_post_order(&filesystem, Path::new("/repo")).unwrap();
    let (rel, hello) = &walk[1];
    assert_eq!(rel, "src/jvm/hello");
    assert_eq!(hello.regular_files, vec!["Hello.java"]);
    assert_eq!(hello.subdirectories, vec!["util"]);
}

#[test]
fn test_walk_skips_hidden_and_bazel_output_directories() {
    let filesystem = MockFileSystemProvider::new()
        .with_file("/repo/.git/HEAD", "")
        .with_file("/repo/bazel-out/x/Gen.java", "")
        .with_file("/repo/src/A.java", "");

    let order: Vec<String> = walk_post_order(&filesystem, Path::new("/repo"))
        .unwrap()
        .into_iter()
        .map(|(rel, _)| rel)
        .collect();
    assert_eq!(order, vec!["src", ""]);
}

#[test]
fn test_walk_missing_root_fails() {
    let filesystem = MockFileSystemProvider::new();
    assert!(walk_post_order(&filesystem, Path::new("/nowhere")).is_err());
}
