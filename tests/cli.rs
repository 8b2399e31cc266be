use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn viewer() -> Command {
    Command::cargo_bin("vezda-view").unwrap()
}

#[test]
fn help_lists_viewers() {
    viewer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("data"))
        .stdout(predicate::str::contains("impulse"))
        .stdout(predicate::str::contains("vectors"))
        .stdout(predicate::str::contains("image"));
}

#[test]
fn style_flags_are_documented() {
    viewer()
        .args(["image", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--isolevel"))
        .stdout(predicate::str::contains("--colorbar"));
}

#[test]
fn missing_path_is_rejected() {
    viewer()
        .args(["data", "/definitely/not/here.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Path not found"));
}

#[test]
fn unreadable_file_fails_before_terminal_setup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.nc");
    std::fs::write(&path, b"not a netcdf file").unwrap();
    viewer()
        .arg("image")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

#[test]
fn subcommand_is_required() {
    viewer().assert().failure();
}

#[test]
fn unknown_colormap_is_rejected() {
    let dir = TempDir::new().unwrap();
    viewer()
        .arg("image")
        .arg(dir.path())
        .args(["--image-colormap", "rainbow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rainbow"));
}
