//! Generated `java_library` rules and their BUILD file text

use crate::primitives::{PackageName, RuleLabel};
use std::collections::BTreeSet;

pub const JAVA_LIBRARY_KIND: &str = "java_library";
pub const JAVA_RULES_BZL: &str = "@rules_java//java:defs.bzl";
pub const BUILD_FILE_NAME: &str = "BUILD.bazel";

const INDENT: &str = "    ";

/// One `java_library` rule for one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaLibraryRule {
    pub name: String,
    /// Slash-separated directory relative to the repository root
    pub package_dir: String,
    /// Package this rule declares to the rule index
    pub package: PackageName,
    /// Source file names, sorted
    pub srcs: Vec<String>,
    pub visibility: Vec<String>,
    /// Packages imported by the sources; never rendered
    pub imports: BTreeSet<PackageName>,
    /// `None` until resolved, and when nothing was resolved
    pub deps: Option<Vec<String>>,
}

impl JavaLibraryRule {
    pub fn label(&self) -> RuleLabel {
        RuleLabel::new(self.package_dir.clone(), self.name.clone())
    }

    /// Starlark call for this rule, without the `load` statement
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(JAVA_LIBRARY_KIND);
        out.push_str("(\n");
        out.push_str(&format!("{INDENT}name = {},\n", quote(&self.name)));
        write_list(&mut out, "srcs", &self.srcs);
        write_list(&mut out, "visibility", &self.visibility);
        if let Some(deps) = &self.deps {
            write_list(&mut out, "deps", deps);
        }
        out.push_str(")\n");
        out
    }
}

/// Full BUILD file text for the rules of one directory
pub fn render_build_file(rules: &[JavaLibraryRule]) -> String {
    let mut out = format!(
        "load({}, {})\n",
        quote(JAVA_RULES_BZL),
        quote(JAVA_LIBRARY_KIND)
    );
    for rule in rules {
        out.push('\n');
        out.push_str(&rule.render());
    }
    out
}

// Single-element lists stay inline, longer ones get one element per line
fn write_list(out: &mut String, attr: &str, values: &[String]) {
    match values {
        [] => out.push_str(&format!("{INDENT}{attr} = [],\n")),
        [value] => out.push_str(&format!("{INDENT}{attr} = [{}],\n", quote(value))),
        _ => {
            out.push_str(&format!("{INDENT}{attr} = [\n"));
            for value in values {
                out.push_str(&format!("{INDENT}{INDENT}{},\n", quote(value)));
            }
            out.push_str(&format!("{INDENT}],\n"));
        }
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    include!("rule.test.rs");
}
