use assert_cmd::Command;
use predicates::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Deserialize)]
struct Fixture {
    lhs: String,
    rhs: String,
    expected: String,
}

fn load_fixture(name: &str) -> Fixture {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../jdiff-core/tests/fixtures/render")
        .join(format!("{name}.json"));
    let data = fs::read_to_string(path).expect("fixture readable");
    serde_json::from_str(&data).expect("fixture deserializes")
}

fn write_tempfile(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create tempfile");
    write!(file, "{contents}").expect("write tempfile");
    file
}

fn jdiff() -> Command {
    let mut cmd = Command::cargo_bin("jdiff").expect("binary jdiff should be built");
    cmd.env_remove("JDIFF_LOG");
    cmd
}

#[test]
fn help_succeeds() {
    jdiff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--keep-arrays-order"));
}

#[test]
fn version_banner() {
    jdiff().arg("--version").assert().success().stdout(predicate::str::starts_with("jdiff "));
}

#[test]
fn diff_matches_fixture_and_exits_one() {
    let fixture = load_fixture("nested_config");
    let lhs = write_tempfile(&fixture.lhs);
    let rhs = write_tempfile(&fixture.rhs);

    jdiff()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(fixture.expected)
        .stderr(predicate::str::is_empty());
}

#[test]
fn equal_documents_exit_zero() {
    let fixture = load_fixture("identical");
    let lhs = write_tempfile(&fixture.lhs);
    let rhs = write_tempfile(&fixture.rhs);

    jdiff()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(0)
        .stdout(fixture.expected)
        .stderr(predicate::str::is_empty());
}

#[test]
fn keep_arrays_order_flag_switches_mode() {
    let fixture = load_fixture("ordered_positional");
    let lhs = write_tempfile(&fixture.lhs);
    let rhs = write_tempfile(&fixture.rhs);

    jdiff().arg(lhs.path()).arg(rhs.path()).assert().code(0);

    jdiff()
        .arg("-o")
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(fixture.expected);
}

#[test]
fn single_argument_reads_stdin() {
    let fixture = load_fixture("end_to_end");
    let lhs = write_tempfile(&fixture.lhs);

    jdiff()
        .arg(lhs.path())
        .write_stdin(fixture.rhs)
        .assert()
        .code(1)
        .stdout(fixture.expected)
        .stderr(predicate::str::is_empty());
}

#[test]
fn color_output_wraps_removed_and_added_lines() {
    let fixture = load_fixture("end_to_end");
    let lhs = write_tempfile(&fixture.lhs);
    let rhs = write_tempfile(&fixture.rhs);

    jdiff()
        .arg("--color")
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\u{1b}[31m-             \"x\",\u{1b}[0m"))
        .stdout(predicate::str::contains("\u{1b}[32m+             \"y\"\u{1b}[0m"));
}

#[test]
fn output_flag_writes_file() {
    let fixture = load_fixture("end_to_end");
    let lhs = write_tempfile(&fixture.lhs);
    let rhs = write_tempfile(&fixture.rhs);
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("diff.txt");

    jdiff()
        .arg("--output")
        .arg(&target)
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(target).expect("output written"), fixture.expected);
}

#[test]
fn invalid_json_exits_two() {
    let lhs = write_tempfile("{\"a\": 1}");
    let rhs = write_tempfile("{not json");

    jdiff()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to parse second input"))
        .stderr(predicate::str::contains("input not valid JSON"));
}

#[test]
fn overflowing_float_exits_two() {
    let lhs = write_tempfile("[1e400]");
    let rhs = write_tempfile("[1]");

    jdiff()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse first input"))
        .stderr(predicate::str::contains("number out of range: 1e400"));
}

#[test]
fn big_integers_are_compared_exactly() {
    let lhs = write_tempfile("{\"id\":123456789012345678901234567890}");
    let rhs = write_tempfile("{\"id\":123456789012345678901234567891}");

    jdiff()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("-             123456789012345678901234567890,"))
        .stdout(predicate::str::contains("+             123456789012345678901234567891"));
}

#[test]
fn missing_file_exits_two() {
    let lhs = write_tempfile("{}");

    jdiff()
        .arg(lhs.path())
        .arg("/definitely/not/here.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read /definitely/not/here.json"));
}
