use assert_cmd::Command;
use std::fs;

#[test]
fn list_prints_the_bundled_references() {
    let output = Command::cargo_bin("graven")
        .unwrap()
        .arg("--list")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("John 3:16"));
    assert!(stdout.contains("Proverbs 3:5-6"));
}

#[test]
fn list_includes_passages_loaded_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extra.txt");
    fs::write(&path, "John 11:35\nJesus wept.\n").unwrap();

    let output = Command::cargo_bin("graven")
        .unwrap()
        .args(["--list", "-f"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("John 11:35"));
}

#[test]
fn loading_a_missing_file_fails_with_a_usage_error() {
    let output = Command::cargo_bin("graven")
        .unwrap()
        .args(["--list", "-f", "/definitely/not/here.txt"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("could not load passages"));
}

#[test]
fn unknown_reference_fails_before_the_tui_starts() {
    let output = Command::cargo_bin("graven")
        .unwrap()
        .args(["-r", "Obadiah 1:1"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no passage in the library matches"));
}

#[test]
fn malformed_reference_flag_is_rejected() {
    let output = Command::cargo_bin("graven")
        .unwrap()
        .args(["-r", "nonsense"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("malformed reference"));
}

#[test]
fn tui_refuses_a_non_tty_stdin() {
    let output = Command::cargo_bin("graven").unwrap().output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("stdin must be a tty"));
}
