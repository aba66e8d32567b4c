//! Repository fixtures for E2E tests
//!
//! A small Bazel workspace: `hello` depends on a sibling utility package, a
//! shared printer package and two jackson artifacts; `hello/util` pulls in
//! guava. The query output mirrors what `bazel query --output=build` prints
//! for rules_jvm_external `jvm_import` targets.

/// Captured `bazel query "kind(jvm_import, @maven//:all)" --output=build`
pub const MAVEN_QUERY_OUTPUT: &str = r#"# /home/dev/.cache/bazel/_bazel_dev/external/maven/BUILD:14:11
jvm_import(
  name = "com_fasterxml_jackson_core_jackson_core",
  tags = ["maven_coordinates=com.fasterxml.jackson.core:jackson-core:2.13.3"],
  jars = ["@maven//:v1/https/repo1.maven.org/maven2/com/fasterxml/jackson/core/jackson-core/2.13.3/jackson-core-2.13.3.jar"],
  deps = [],
)
# /home/dev/.cache/bazel/_bazel_dev/external/maven/BUILD:27:11
jvm_import(
  name = "com_fasterxml_jackson_core_jackson_databind",
  tags = ["maven_coordinates=com.fasterxml.jackson.core:jackson-databind:2.13.3"],
  jars = ["@maven//:v1/https/repo1.maven.org/maven2/com/fasterxml/jackson/core/jackson-databind/2.13.3/jackson-databind-2.13.3.jar"],
  deps = ["@maven//:com_fasterxml_jackson_core_jackson_core"],
)
# /home/dev/.cache/bazel/_bazel_dev/external/maven/BUILD:40:11
jvm_import(
  name = "com_google_guava_guava",
  tags = ["maven_coordinates=com.google.guava:guava:31.1-jre"],
  jars = ["@maven//:v1/https/repo1.maven.org/maven2/com/google/guava/guava/31.1-jre/guava-31.1-jre.jar"],
  deps = [],
)
"#;

/// Placement overrides for artifacts whose group differs from their packages
pub const OVERRIDES_JSON: &str = r#"{
  "@maven//:com_fasterxml_jackson_core_jackson_databind": ["com.fasterxml.jackson.databind"],
  "@maven//:com_google_guava_guava": ["com.google.common"]
}
"#;

pub const HELLO_JAVA: &str = r#"package hello;

import com.fasterxml.jackson.core.JsonProcessingException;
import com.fasterxml.jackson.databind.ObjectMapper;
import common.print.Printer;
import hello.util.HelloUtil;

public class Hello {
  public static void main(String[] args) throws JsonProcessingException {
    ObjectMapper mapper = new ObjectMapper();
    Printer.print(mapper.writeValueAsString(HelloUtil.greeting()));
  }
}
"#;

pub const HELLO_UTIL_JAVA: &str = r#"package hello.util;

import com.google.common.base.Strings;
import common.print.Printer;

public class HelloUtil {
  public static String greeting() {
    return Strings.repeat("hello ", 2);
  }
}
"#;

pub const PRINTER_JAVA: &str = r#"package common.print;

import static java.lang.System.out;

public class Printer {
  public static void print(String text) {
    out.println(text);
  }
}
"#;

/// Files of the hello workspace, relative to the repository root
pub const HELLO_REPOSITORY: &[(&str, &str)] = &[
    ("WORKSPACE", ""),
    ("3rdparty/jvm/thirdparty_map_overrides.json", OVERRIDES_JSON),
    ("src/jvm/hello/Hello.java", HELLO_JAVA),
    ("src/jvm/hello/util/HelloUtil.java", HELLO_UTIL_JAVA),
    ("src/jvm/common/print/Printer.java", PRINTER_JAVA),
];

/// Where tests put the captured query output
pub const MAVEN_QUERY_FILE: &str = "maven.query";

/// Expected BUILD.bazel for `src/jvm/hello`
pub const HELLO_BUILD: &str = r#"load("@rules_java//java:defs.bzl", "java_library")

java_library(
    name = "hello",
    srcs = ["Hello.java"],
    visibility = ["//visibility:public"],
    deps = [
        "//src/jvm/common/print",
        "//src/jvm/hello/util",
        "@maven//:com_fasterxml_jackson_core_jackson_core",
        "@maven//:com_fasterxml_jackson_core_jackson_databind",
    ],
)
"#;
