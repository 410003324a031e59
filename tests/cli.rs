use std::fs;

use assert_cmd::Command;
use tempfile::tempdir;

fn ker() -> Command {
    let mut cmd = Command::cargo_bin("ker").expect("Failed to locate ker binary");
    cmd.env_remove("KER_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is UTF-8")
}

#[test]
fn test_banner_without_arguments() {
    let out = stdout_of(&mut ker());
    assert_eq!(out, "ker 1.0.0 by KeiraOMG0\nRun 'ker -h' for help\n");
}

#[test]
fn test_info_flags() {
    assert_eq!(stdout_of(ker().arg("--version")), "1.0.0\n");
    assert_eq!(stdout_of(ker().arg("--author")), "KeiraOMG0\n");
    assert_eq!(
        stdout_of(ker().arg("--info")),
        "ker 1.0.0\nAuthor: KeiraOMG0\nGoal: Format and convert .ker config files with JSON interop\n"
    );
}

#[test]
fn test_help_exits_zero() {
    let out = stdout_of(ker().arg("--help"));
    assert!(out.contains("fmt"));
    assert!(out.contains("to-json"));
    assert!(out.contains("from-json"));
}

#[test]
fn test_fmt_stdin_to_stdout() {
    let out = stdout_of(ker().args(["fmt", "-"]).write_stdin("b=1 # note\na:{x=[1,2,]}"));
    assert_eq!(out, "b = 1\na {\n    x = [1, 2]\n}\n");
}

#[test]
fn test_fmt_with_indent() {
    let out = stdout_of(ker().args(["fmt", "-", "--indent", "2"]).write_stdin("a { b = 1 }"));
    assert_eq!(out, "a {\n  b = 1\n}\n");
}

#[test]
fn test_fmt_file_to_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.ker");

    ker()
        .args(["fmt", "tests/fixtures/sample.ker"])
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("name = \"gateway\"\nversion = 3\n"));
    assert!(text.ends_with("fallback = null\n"));
}

#[test]
fn test_to_json() {
    let out = stdout_of(ker().args(["to-json", "-", "-i", "4"]).write_stdin("a { b = [1, 2.5] }"));
    assert_eq!(out, "{\n    \"a\": {\n        \"b\": [1, 2.5]\n    }\n}\n");
}

#[test]
fn test_from_json_file() {
    let out = stdout_of(ker().args(["from-json", "tests/fixtures/sample.json"]));
    assert_eq!(
        out,
        "name = \"gateway\"\nlimits {\n    rps = 100\n    burst = 1.5\n}\nhosts = [\n    \"a\",\n    \"b\",\n    \"c\",\n    \"d\",\n    \"e\",\n    \"f\",\n]\n"
    );
}

#[test]
fn test_ker_json_ker_round_trip() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("sample.json");
    let back = dir.path().join("back.ker");

    ker()
        .args(["to-json", "tests/fixtures/sample.ker"])
        .arg(&json)
        .assert()
        .success();
    ker().arg("from-json").arg(&json).arg(&back).assert().success();

    let direct = stdout_of(ker().args(["fmt", "tests/fixtures/sample.ker"]));
    assert_eq!(fs::read_to_string(&back).unwrap(), direct);
}

#[test]
fn test_parse_error_exit_code() {
    let assert = ker().args(["fmt", "-"]).write_stdin("a = 1\nb = [1 2]").assert().code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("2:8"), "{stderr}");
}

#[test]
fn test_duplicate_json_key_exit_code() {
    ker()
        .args(["from-json", "-"])
        .write_stdin(r#"{"a": 1, "a": 2}"#)
        .assert()
        .code(1);
}

#[test]
fn test_missing_file_exit_code() {
    let assert = ker().args(["fmt", "does/not/exist.ker"]).assert().code(2);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("file not found"), "{stderr}");
}
