use hdrdecl::core::{HeaderScanner, Pipeline, PipelineConfig};
use hdrdecl::formatters::OutputFormat;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn follows_local_includes_once() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(
        src.path(),
        "Alpha.h",
        "#include \"beta.h\"\n#include <stdio.h>\n#include \"missing.h\"\nint alpha(void);\n",
    );
    write(src.path(), "beta.h", "#include \"Alpha.h\"\nint beta(void);\n");

    let config = PipelineConfig::default().with_output_dir(out.path());
    let summary = Pipeline::new(config)
        .run(&[src.path().join("Alpha.h")])
        .unwrap();

    assert_eq!(summary.written.len(), 2);
    assert_eq!(summary.missing.len(), 1);
    assert!(summary.missing[0].ends_with("missing.h"));
    assert!(summary.failed.is_empty());

    let alpha = fs::read_to_string(out.path().join("alpha.yaml")).unwrap();
    assert!(alpha.contains("id: alpha"));
    assert!(alpha.contains("system: true"));
    let beta = fs::read_to_string(out.path().join("beta.yaml")).unwrap();
    assert!(beta.contains("id: beta"));
}

#[test]
fn no_follow_processes_roots_only() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "a.h", "#include \"b.h\"\n");
    write(src.path(), "b.h", "int b;\n");

    let config = PipelineConfig::default()
        .with_output_dir(out.path())
        .with_follow_includes(false)
        .with_format(OutputFormat::Json);
    let summary = Pipeline::new(config)
        .run(&[src.path().join("a.h")])
        .unwrap();

    assert_eq!(summary.written.len(), 1);
    assert!(out.path().join("a.json").is_file());
    assert!(!out.path().join("b.json").exists());
}

#[test]
fn structural_error_fails_only_that_header() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "bad.h", "#ifdef OPEN\nint x;\n");
    write(src.path(), "good.h", "int y;\n");

    let config = PipelineConfig::default().with_output_dir(out.path());
    let roots = [src.path().join("bad.h"), src.path().join("good.h")];
    let summary = Pipeline::new(config).run(&roots).unwrap();

    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("bad.h"));
    assert!(!out.path().join("bad.yaml").exists());
    assert!(out.path().join("good.yaml").is_file());
}

#[test]
fn unsupported_defaults_are_counted() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "flags.h", "void set(bool on = true);\n");

    let config = PipelineConfig::default().with_output_dir(out.path());
    let summary = Pipeline::new(config)
        .run(&[src.path().join("flags.h")])
        .unwrap();
    assert_eq!(summary.diagnostics, 1);
}

#[test]
fn scanner_collects_headers_from_directories() {
    let src = TempDir::new().unwrap();
    fs::create_dir(src.path().join("nested")).unwrap();
    write(src.path(), "one.h", "");
    write(src.path(), "two.hpp", "");
    write(src.path(), "skip.c", "");
    write(&src.path().join("nested"), "three.hh", "");
    let explicit = src.path().join("skip.c");

    let scanner = HeaderScanner::new();
    let found = scanner
        .collect(&[src.path().to_path_buf(), explicit.clone()])
        .unwrap();

    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"one.h".to_string()));
    assert!(names.contains(&"two.hpp".to_string()));
    assert!(names.contains(&"three.hh".to_string()));
    // explicit files are taken as given
    assert!(found.contains(&explicit));
    assert_eq!(found.len(), 4);

    assert!(scanner.is_header(Path::new("x.H")));
    assert!(!scanner.is_header(Path::new("x.c")));
    assert!(HeaderScanner::with_extensions([".inl"]).is_header(Path::new("x.inl")));
}
