use super::*;

fn hello_rule(deps: Option<Vec<&str>>) -> JavaLibraryRule {
    JavaLibraryRule {
        name: "hello".to_string(),
        package_dir: "src/jvm/hello".to_string(),
        package: PackageName::new("hello"),
        srcs: vec!["Hello.java".to_string()],
        visibility: vec!["//visibility:public".to_string()],
        imports: BTreeSet::from([PackageName::new("common.print")]),
        deps: deps.map(|deps| deps.into_iter().map(String::from).collect()),
    }
}

#[test]
fn test_label_uses_directory_and_name() {
    let label = hello_rule(None).label();
    assert_eq!(label.to_string(), "src/jvm/hello:hello");
    assert_eq!(label.dependency_label().as_str(), "//src/jvm/hello");
}

#[test]
fn test_render_without_deps_omits_attribute() {
    assert_eq!(
        hello_rule(None).render(),
        "java_library(\n    name = \"hello\",\n    srcs = [\"Hello.java\"],\n    visibility = [\"//visibility:public\"],\n)\n"
    );
}

#[test]
fn test_render_multiline_deps() {
    let rule = hello_rule(Some(vec![
        "//src/jvm/common/print",
        "@maven//:com_fasterxml_jackson_core_jackson_core",
    ]));

    let expected = r#"java_library(
    name = "hello",
    srcs = ["Hello.java"],
    visibility = ["//visibility:public"],
    deps = [
        "//src/jvm/common/print",
        "@maven//:com_fasterxml_jackson_core_jackson_core",
    ],
)
"#;
    assert_eq!(rule.render(), expected);
}

#[test]
fn test_render_build_file_loads_rules_java() {
    let text = render_build_file(&[hello_rule(Some(vec!["//src/jvm/common/print"]))]);
    assert!(text.starts_with("load(\"@rules_java//java:defs.bzl\", \"java_library\")\n\njava_library(\n"));
    assert!(text.contains("    deps = [\"//src/jvm/common/print\"],\n"));
}

#[test]
fn test_quotes_are_escaped() {
    assert_eq!(quote(r#"we"ird"#), r#""we\"ird""#);
}

#[test]
fn test_render_empty_list_stays_inline() {
    let rule = JavaLibraryRule {
        visibility: Vec::new(),
        ..hello_rule(None)
    };
    assert!(rule.render().contains("    visibility = [],\n)\n"));
}
