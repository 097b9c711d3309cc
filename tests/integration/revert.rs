#![cfg(unix)]

use predicates::prelude::*;

use crate::common::{TestProject, assert_same_file, snapshot};

#[test]
fn test_revert_restores_original_svelte() {
    let project = TestProject::with_svelte("4.0.0").unwrap();
    project.command().arg("apply").assert().success();
    assert_ne!(snapshot(&project.target_dir()), snapshot(&project.original_fixture()));

    project
        .command()
        .args(["--no-progress", "-revert"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "svelte-accmod-patch (revert) > deleting patched 'svelte' from 'node_modules' and reinstalling original 'svelte' ...",
        ))
        .stdout(predicate::str::contains("patched 'svelte' deleted!"))
        .stdout(predicate::str::contains("re-installed original 'svelte'!"))
        .stdout(predicate::str::contains("DONE! 👍 You're now using original 'svelte' again!"));

    assert_eq!(snapshot(&project.target_dir()), snapshot(&project.original_fixture()));
    assert!(!project.companion_dir().exists());
    assert_eq!(project.npm_calls().last().map(String::as_str), Some("install"));
}

#[test]
fn test_revert_subcommand_spelling() {
    let project = TestProject::with_svelte("4.0.0").unwrap();

    project.command().arg("revert").assert().success();
    assert_eq!(project.npm_calls(), ["install"]);
}

#[test]
fn test_revert_drops_files_added_by_patch() {
    let project = TestProject::with_svelte("4.0.0").unwrap();
    std::fs::write(project.target_dir().join("internal").join("accmod-only.js"), "x").unwrap();

    project.command().arg("-revert").assert().success();
    assert!(!project.target_dir().join("internal").join("accmod-only.js").exists());
    assert_same_file(
        &project.target_dir().join("index.js"),
        &project.original_fixture().join("index.js"),
    );
}

#[test]
fn test_revert_without_installed_svelte_still_reinstalls() {
    let project = TestProject::new("4.0.0").unwrap();

    project
        .command()
        .arg("-revert")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"))
        .stdout(predicate::str::contains("re-installed original 'svelte'!"));

    assert_eq!(project.npm_calls(), ["install"]);
    assert!(project.target_dir().join("package.json").is_file());
}

#[test]
fn test_revert_stops_when_delete_fails() {
    let project = TestProject::new("4.0.0").unwrap();
    std::fs::create_dir_all(project.project_path().join("node_modules")).unwrap();
    std::fs::write(project.target_dir(), "not a directory").unwrap();

    project
        .command()
        .arg("-revert")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "oops! 😬 something went wrong while trying to delete patched 'svelte'!",
        ))
        .stdout(predicate::str::contains("DONE!").not());

    assert!(project.npm_calls().is_empty(), "npm install must not run");
    assert!(project.target_dir().is_file());
}

#[test]
fn test_revert_reports_failed_reinstall() {
    let project = TestProject::with_svelte("4.0.0").unwrap();
    project.fail_npm("install").unwrap();

    project
        .command()
        .arg("-revert")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "oops! 😬 something went wrong while trying to re-install original 'svelte'!",
        ))
        .stderr(predicate::str::contains("npm install failed"))
        .stdout(predicate::str::contains("DONE!").not());

    // Deletion happened before npm failed
    assert!(!project.target_dir().exists());
}
