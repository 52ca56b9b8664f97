use assert_cmd::Command;
use predicates::prelude::*;

fn reelgraph() -> Command {
    Command::cargo_bin("reelgraph").unwrap()
}

#[test]
fn list_names_the_folder_operators() {
    reelgraph()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("folder.get"))
        .stdout(predicate::str::contains("timeline.export"));
}

#[test]
fn list_json_is_parseable() {
    let output = reelgraph().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let infos: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(infos.as_array().unwrap().len() >= 20);
}

#[test]
fn describe_shows_the_plugs() {
    reelgraph()
        .args(["describe", "folder.get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folder_path"))
        .stdout(predicate::str::contains("FullPath"));
}

#[test]
fn describe_unknown_operator_fails() {
    reelgraph()
        .args(["describe", "does.not.exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does.not.exist"));
}

#[test]
fn demo_creates_then_finds_the_path() {
    reelgraph()
        .args(["demo", "--path", "Footage/Day 02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created 'Day 02'"))
        .stdout(predicate::str::contains("found"));
}
