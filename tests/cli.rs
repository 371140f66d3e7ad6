/*!
 * End-to-end tests running the dirdump binary
 */

use std::fs;
use std::process::Command;

use tempfile::tempdir;

const BIN: &str = env!("CARGO_BIN_EXE_dirdump");

#[test]
fn test_scans_given_directory_into_fixed_output() {
    let project = tempdir().unwrap();
    fs::write(project.path().join(".gitignore"), "target/\n").unwrap();
    fs::create_dir(project.path().join("target")).unwrap();
    fs::write(project.path().join("target").join("out.bin"), "compiled").unwrap();
    fs::write(project.path().join("main.txt"), "hello from main").unwrap();

    let work = tempdir().unwrap();
    let output = Command::new(BIN)
        .arg(project.path())
        .current_dir(work.path())
        .output()
        .expect("failed to run dirdump");

    assert!(output.status.success());

    let report = fs::read_to_string(work.path().join("directory_contents.txt")).unwrap();
    assert!(report.contains("hello from main"));
    assert!(!report.contains("compiled"));
    assert!(report.contains("Total files processed: 2"));
    assert!(report.contains("Total files ignored: 1"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Files Processed: 2"));
}

#[test]
fn test_defaults_to_current_directory() {
    let project = tempdir().unwrap();
    fs::write(project.path().join("notes.txt"), "remember this").unwrap();

    let output = Command::new(BIN)
        .current_dir(project.path())
        .output()
        .expect("failed to run dirdump");

    assert!(output.status.success());

    let report = fs::read_to_string(project.path().join("directory_contents.txt")).unwrap();
    assert!(report.contains("remember this"));
    // The report being written is not part of its own contents
    assert!(!report.contains("📄 FILE: directory_contents.txt"));
    assert!(report.contains("Total files processed: 1"));
}

#[test]
fn test_missing_directory_fails() {
    let work = tempdir().unwrap();
    let output = Command::new(BIN)
        .arg(work.path().join("does-not-exist"))
        .current_dir(work.path())
        .output()
        .expect("failed to run dirdump");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
    assert!(!work.path().join("directory_contents.txt").exists());
}
