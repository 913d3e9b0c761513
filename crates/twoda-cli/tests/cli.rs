use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ITEMS: &str = "2DA V2.0\nDefault: -1\nLabel Name Cost\n0 Sword 15\n1 \"Long Bow\" ****\n2 Dagger\n";

fn write_items(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("items.2da");
    fs::write(&path, ITEMS).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    cargo_bin_cmd!("twoda")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("cell"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn info_prints_shape() {
    let tmp = TempDir::new().unwrap();
    let file = write_items(&tmp);

    cargo_bin_cmd!("twoda")
        .arg("info")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: V2.0"))
        .stdout(predicate::str::contains("Rows: 3"))
        .stdout(predicate::str::contains("Columns: 3"))
        .stdout(predicate::str::contains("Default: -1"))
        .stdout(predicate::str::contains("Headers: Label, Name, Cost"));
}

#[test]
fn cell_by_name_and_index() {
    let tmp = TempDir::new().unwrap();
    let file = write_items(&tmp);

    // Row labels are dropped, so the first header names the first data cell
    cargo_bin_cmd!("twoda")
        .args(["cell", "--row", "0", "--col", "Label", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout("Sword\n");

    cargo_bin_cmd!("twoda")
        .args(["cell", "--row", "0", "--col", "1", "--as", "int", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout("15\n");
}

#[test]
fn cell_fallbacks() {
    let tmp = TempDir::new().unwrap();
    let file = write_items(&tmp);

    // Explicitly empty
    cargo_bin_cmd!("twoda")
        .args(["cell", "--row", "1", "--col", "Name", "--as", "int", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout("0\n");

    // Short row falls back to the default
    cargo_bin_cmd!("twoda")
        .args(["cell", "--row", "2", "--col", "Name", "--as", "int", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout("-1\n");

    // Unknown column too
    cargo_bin_cmd!("twoda")
        .args(["cell", "--row", "0", "--col", "Weight", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout("-1\n");
}

#[test]
fn show_limits_rows() {
    let tmp = TempDir::new().unwrap();
    let file = write_items(&tmp);

    cargo_bin_cmd!("twoda")
        .args(["show", "--limit", "1", "--columns", "Label", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tSword"))
        .stdout(predicate::str::contains("... (2 more rows)"));
}

#[test]
fn export_csv() {
    let tmp = TempDir::new().unwrap();
    let file = write_items(&tmp);
    let out = tmp.path().join("items.csv");

    cargo_bin_cmd!("twoda")
        .args(["export", "--format", "csv", "--file"])
        .arg(&file)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 rows"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Label,Name,Cost\n"));
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("Dagger,,\n"));
}

#[test]
fn export_json() {
    let tmp = TempDir::new().unwrap();
    let file = write_items(&tmp);
    let out = tmp.path().join("items.json");

    cargo_bin_cmd!("twoda")
        .args(["export", "--format", "json", "--file"])
        .arg(&file)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let json = fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"default_string\": \"-1\""));
    assert!(json.contains("\"Long Bow\""));
}

#[test]
fn bad_signature_fails() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("broken.2da");
    fs::write(&file, "BADFV2.0\n").unwrap();

    cargo_bin_cmd!("twoda")
        .arg("info")
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: not a 2DA file"));
}

#[test]
fn scan_reports_failures_without_failing() {
    let tmp = TempDir::new().unwrap();
    write_items(&tmp);
    fs::write(tmp.path().join("broken.2da"), "2DA V3.0\n").unwrap();

    cargo_bin_cmd!("twoda")
        .arg("scan")
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("V2.0\t3 rows x 3 columns"))
        .stdout(predicate::str::contains("error: unsupported 2DA version"))
        .stdout(predicate::str::contains("Scanned 2 files: 1 loaded, 1 failed"));
}
