use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn translates_single_expression() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.arg("button")
        .assert()
        .success()
        .stdout("button_PushButtonQT = {\n    \"archetype\": \"PushButtonQT\",\n    \"visible\": 1\n}\n");
}

#[test]
fn reports_errors_with_context() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.arg("book[@id='1")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "Unterminated string literal opened at offset 9",
        ))
        .stderr(predicate::str::contains(">>   1 | book[@id='1"))
        .stderr(predicate::str::contains("|          ^"));
}

#[test]
fn json_format() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.args(["--format", "json", "form/button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"form_ModuleQT_button_PushButtonQT\""))
        .stdout(predicate::str::contains("\"container\": \"form_ModuleQT\""));
}

#[test]
fn unknown_format_fails() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.args(["--format", "xml", "button"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'xml' not found"));
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.arg("--list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("declarations"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("yaml"));
}

#[test]
fn segments_mode_skips_unreadable_segments() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.args(["--segments", "/form/*/button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("form_ModuleQT_button_PushButtonQT = {"))
        .stdout(predicate::str::contains("any_").not());
}

#[test]
fn reads_expressions_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# two locators").unwrap();
    writeln!(file, "form").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "row[2]").unwrap();

    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("form_ModuleQT = {"))
        .stdout(predicate::str::contains("\"occurrence\": 2"));
}

#[test]
fn file_errors_name_the_line() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "form").unwrap();
    writeln!(file, "row[").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.arg("--file")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("{}:2", path)));
}

#[test]
fn config_file_sets_indent() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[render]\nindent = 2").unwrap();

    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.arg("--config")
        .arg(file.path())
        .arg("button")
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"visible\": 1\n}"));
}

#[test]
fn missing_expression_shows_help() {
    let mut cmd = cargo_bin_cmd!("xloc");
    cmd.assert().failure();
}
