use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doxyrst")))
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copy the Doxygen fixture tree so a test can break parts of it.
fn fixture_copy() -> TempDir {
    let dir = TempDir::new().unwrap();
    for entry in fs::read_dir(fixture_path("imagephp")).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

fn generate(input: &Path, output: &Path) -> assert_cmd::assert::Assert {
    cmd()
        .args(["-i", input.to_str().unwrap()])
        .args(["-o", output.to_str().unwrap()])
        .assert()
}

/// Every generated page, relative to `dir`, sorted.
fn pages(dir: &Path) -> Vec<String> {
    let pattern = format!("{}/**/*.rst", dir.display());
    let mut found: Vec<String> = glob::glob(&pattern)
        .unwrap()
        .filter_map(|p| p.ok())
        .map(|p| {
            p.strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    found.sort();
    found
}

// -- full run --

#[test]
fn writes_page_tree() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path()).success();

    assert_eq!(
        pages(out.path()),
        [
            "api.rst",
            "api/_util.rst",
            "api/color.rst",
            "api/image.rst",
            "api/util/decoder.rst",
            "api/util/lzwdecodebuffer.rst",
        ]
    );
}

#[test]
fn root_index_page() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path()).success();

    let index = fs::read_to_string(out.path().join("api.rst")).unwrap();
    assert_eq!(
        index,
        "API documentation\n=================\n\n.. toctree::\n   :glob:\n\n   api/*\n\n\n    \n"
    );
}

#[test]
fn child_namespace_page() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path()).success();

    let index = fs::read_to_string(out.path().join("api/_util.rst")).unwrap();
    assert_eq!(
        index,
        "Util namespace\n==============\n\n.. toctree::\n   :glob:\n\n   util/*\n\n\n"
    );
}

#[test]
fn class_page_matches_expected() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path()).success();

    let output = fs::read_to_string(out.path().join("api/image.rst")).unwrap();
    let expected = fs::read_to_string(fixture_path("expected/image.rst")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn interface_page_matches_expected() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path()).success();

    let output = fs::read_to_string(out.path().join("api/util/decoder.rst")).unwrap();
    let expected = fs::read_to_string(fixture_path("expected/decoder.rst")).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn rerun_is_byte_identical() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path()).success();
    let first: Vec<Vec<u8>> = pages(out.path())
        .iter()
        .map(|p| fs::read(out.path().join(p)).unwrap())
        .collect();

    generate(&fixture_path("imagephp"), out.path()).success();
    let second: Vec<Vec<u8>> = pages(out.path())
        .iter()
        .map(|p| fs::read(out.path().join(p)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn progress_names_each_node() {
    let out = TempDir::new().unwrap();
    generate(&fixture_path("imagephp"), out.path())
        .success()
        .stderr(predicate::str::contains("Processing namespace Mike42::ImagePhp"))
        .stderr(predicate::str::contains(
            "Processing class Mike42::ImagePhp::Util::Decoder",
        ));
}

// -- root selection --

#[test]
fn nested_root_renders_as_top_level() {
    let out = TempDir::new().unwrap();
    cmd()
        .args(["-i", fixture_path("imagephp").to_str().unwrap()])
        .args(["-o", out.path().to_str().unwrap()])
        .args(["-r", "Mike42::ImagePhp::Util"])
        .assert()
        .success();

    assert_eq!(
        pages(out.path()),
        ["api.rst", "api/decoder.rst", "api/lzwdecodebuffer.rst"]
    );
}

#[test]
fn unknown_root_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .args(["-i", fixture_path("imagephp").to_str().unwrap()])
        .args(["-o", out.path().to_str().unwrap()])
        .args(["-r", "Mike42::Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace Mike42::Missing not found"));
}

#[test]
fn missing_index_fails() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    generate(input.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("failed to read index"));
}

// -- damaged input --

#[test]
fn missing_class_file_skips_only_that_class() {
    let input = fixture_copy();
    fs::remove_file(input.path().join("classMike42_1_1ImagePhp_1_1Color.xml")).unwrap();
    let out = TempDir::new().unwrap();

    generate(input.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("classMike42_1_1ImagePhp_1_1Color"))
        .stderr(predicate::str::contains("1 node(s) could not be loaded"));

    let written = pages(out.path());
    assert!(!written.contains(&"api/color.rst".to_string()));
    assert!(written.contains(&"api/image.rst".to_string()));
    assert!(written.contains(&"api/util/decoder.rst".to_string()));
}

#[test]
fn missing_namespace_file_skips_its_subtree() {
    let input = fixture_copy();
    fs::remove_file(input.path().join("namespaceMike42_1_1ImagePhp_1_1Util.xml")).unwrap();
    let out = TempDir::new().unwrap();

    generate(input.path(), out.path()).failure();

    assert_eq!(
        pages(out.path()),
        ["api.rst", "api/color.rst", "api/image.rst"]
    );
}

#[test]
fn malformed_class_file_aborts_with_field_name() {
    let input = fixture_copy();
    fs::write(
        input.path().join("classMike42_1_1ImagePhp_1_1Color.xml"),
        "<doxygen><compounddef kind=\"class\"></compounddef></doxygen>",
    )
    .unwrap();
    let out = TempDir::new().unwrap();

    generate(input.path(), out.path())
        .failure()
        .stderr(predicate::str::contains("compoundname"));
}
