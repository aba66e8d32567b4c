use super::*;
use crate::application::session_mocks::MockFileSystemProvider;

fn scan(text: &str) -> ImportScan {
    ImportScan::from_source(Path::new("src/jvm/hello/Hello.java"), text)
}

fn packages(scan: &ImportScan) -> Vec<&str> {
    scan.packages.iter().map(PackageName::as_str).collect()
}

const HELLO: &str = r#"package hello;

import com.fasterxml.jackson.core.JsonProcessingException;
import com.fasterxml.jackson.databind.ObjectMapper;
import common.print.Printer;
import hello.util.HelloUtil;

public class Hello {
  public static void main(String[] args) throws JsonProcessingException {
    ObjectMapper mapper = new ObjectMapper();
  }
}
"#;

#[test]
fn test_extracts_packages_from_leading_block() {
    let scan = scan(HELLO);
    assert_eq!(
        packages(&scan),
        vec![
            "com.fasterxml.jackson.core",
            "com.fasterxml.jackson.databind",
            "common.print",
            "hello.util",
        ]
    );
    assert!(scan.warnings.is_empty());
    assert_eq!(scan.records.len(), 4);
}

#[test]
fn test_repeated_package_collected_once() {
    let scan = scan("import a.b.C;\nimport a.b.D;\nimport a.b.C;\n");
    assert_eq!(packages(&scan), vec!["a.b"]);
    assert_eq!(scan.records.len(), 3);
}

#[test]
fn test_static_import_is_warned_and_not_collected() {
    let scan = scan("import static a.b.C.m;\n");
    assert!(scan.packages.is_empty());
    assert_eq!(
        scan.warnings,
        vec![ImportWarning::UnsupportedStatic {
            line: "import static a.b.C.m;".to_string()
        }]
    );

    let record = &scan.records[0];
    assert!(record.is_static);
    assert_eq!(record.package.as_str(), "a.b.C");
}

#[test]
fn test_malformed_import_is_warned_and_skipped() {
    let scan = scan("import Foo;\nimport a.b.C;\n");
    assert_eq!(packages(&scan), vec!["a.b"]);
    assert_eq!(
        scan.warnings,
        vec![ImportWarning::Malformed {
            line: "import Foo;".to_string()
        }]
    );
}

#[test]
fn test_scan_stops_at_first_non_import_line() {
    let scan = scan("import a.b.C;\n\nimport x.y.Z;\n");
    assert_eq!(packages(&scan), vec!["a.b"]);
}

#[test]
fn test_malformed_and_static_lines_keep_the_block_open() {
    let scan = scan("import static a.b.C.m;\nimport Bad;\nimport d.e.F;\nclass X {}\nimport g.h.I;\n");
    assert_eq!(packages(&scan), vec!["d.e"]);
    assert_eq!(scan.warnings.len(), 2);
}

#[test]
fn test_indented_or_commented_imports_are_not_recognized() {
    let scan = scan("  import a.b.C;\n// import d.e.F;\n");
    assert!(scan.packages.is_empty());
    assert!(scan.records.is_empty());
}

#[test]
fn test_wildcard_import_yields_its_package() {
    let scan = scan("import java.util.*;\n");
    assert_eq!(packages(&scan), vec!["java.util"]);
}

#[test]
fn test_crlf_line_endings() {
    let scan = scan("package p;\r\n\r\nimport a.b.C;\r\nimport d.e.F;\r\n\r\nclass X {}\r\n");
    assert_eq!(packages(&scan), vec!["a.b", "d.e"]);
}

#[test]
fn test_file_without_imports() {
    let scan = scan("package p;\n\nclass X {}\n");
    assert_eq!(scan, ImportScan::default());
}

#[test]
fn test_from_file_reads_through_filesystem() {
    let filesystem = MockFileSystemProvider::new().with_file("/repo/A.java", "import a.b.C;\n");
    let scan = ImportScan::from_file(&filesystem, Path::new("/repo/A.java")).unwrap();
    assert_eq!(packages(&scan), vec!["a.b"]);
    assert_eq!(scan.records[0].source_file, PathBuf::from("/repo/A.java"));
}

#[test]
fn test_from_file_reports_read_failure() {
    let filesystem = MockFileSystemProvider::new().with_unreadable_file("/repo/A.java");
    let err = ImportScan::from_file(&filesystem, Path::new("/repo/A.java")).unwrap_err();
    let ImportScanError::Read { path, .. } = err;
    assert_eq!(path, PathBuf::from("/repo/A.java"));
}

const LATIN1_SOURCE: &[u8] =
    b"package hello;\n\nimport com.fasterxml.jackson.core.JsonFactory;\n\n// Autor: Jos\xE9\npublic class Hello {}\n";

#[test]
fn test_from_file_tolerates_non_utf8_bytes() {
    let filesystem = MockFileSystemProvider::new().with_bytes("/repo/Hello.java", LATIN1_SOURCE);
    let scan = ImportScan::from_file(&filesystem, Path::new("/repo/Hello.java")).unwrap();
    assert_eq!(packages(&scan), vec!["com.fasterxml.jackson.core"]);
    assert!(scan.warnings.is_empty());
}

#[test]
fn test_from_file_live_latin1_comment_keeps_imports() {
    use crate::application::session::LiveFileSystemProvider;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("Hello.java");
    std::fs::write(&path, LATIN1_SOURCE).unwrap();

    let scan = ImportScan::from_file(&LiveFileSystemProvider, &path).unwrap();
    assert_eq!(packages(&scan), vec!["com.fasterxml.jackson.core"]);
}
