#![cfg(unix)]

use predicates::prelude::*;
use std::fs;

use crate::common::{MANIFEST_DIRS, MANIFEST_FILES, TestProject, assert_same_file, snapshot};

#[test]
fn test_apply_replaces_every_manifest_entry() {
    let project = TestProject::with_svelte("4.0.0").unwrap();

    project
        .command()
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "svelte-accmod-patch (apply) > replacing original 'svelte' files with corresponding 'svelte-accmod' files ...",
        ))
        .stdout(predicate::str::contains("detected svelte version: 4.0.0 ..."))
        .stdout(predicate::str::contains("installed svelte-accmod@4.0.0 ..."))
        .stdout(predicate::str::contains("➜ 📄 compiler.d.ts"))
        .stdout(predicate::str::contains("➜ 📁 internal"))
        .stdout(predicate::str::contains(
            "finished replacing original 'svelte' files with corresponding 'svelte-accmod' files!",
        ))
        .stdout(predicate::str::contains("'svelte-accmod' uninstalled!"))
        .stdout(predicate::str::contains("🚀 DONE! You're now using 'svelte-accmod'!"));

    let target = project.target_dir();
    let companion = project.companion_fixture();
    for file in MANIFEST_FILES {
        assert_same_file(&target.join(file), &companion.join(file));
    }
    for dir in MANIFEST_DIRS {
        assert_same_file(&target.join(dir).join("index.js"), &companion.join(dir).join("index.js"));
        assert_same_file(
            &target.join(dir).join("nested").join("deep.js"),
            &companion.join(dir).join("nested").join("deep.js"),
        );
    }

    // Entries outside the manifest keep the original content
    assert_same_file(&target.join("README.md"), &project.original_fixture().join("README.md"));

    assert!(!project.companion_dir().exists(), "companion should be uninstalled");
    assert_eq!(
        project.npm_calls(),
        ["i svelte-accmod@4.0.0 --save-dev", "uninstall svelte-accmod --save-dev"]
    );
}

#[test]
fn test_apply_uses_version_override() {
    let project = TestProject::with_svelte("3.44.2").unwrap();

    project
        .command()
        .arg("-apply")
        .assert()
        .success()
        .stdout(predicate::str::contains("detected svelte version: 3.44.2 ..."))
        .stdout(predicate::str::contains("installed svelte-accmod@3.44.2-1 ..."));

    assert_eq!(project.npm_calls()[0], "i svelte-accmod@3.44.2-1 --save-dev");
}

#[test]
fn test_apply_subcommand_spelling() {
    let project = TestProject::with_svelte("3.50.1").unwrap();

    project.command().arg("apply").assert().success();
    assert_eq!(project.npm_calls()[0], "i svelte-accmod@3.50.1 --save-dev");
}

#[test]
fn test_apply_twice_matches_apply_once() {
    let project = TestProject::with_svelte("4.0.0").unwrap();

    project.command().assert().success();
    let once = snapshot(&project.target_dir());

    project.command().assert().success();
    let twice = snapshot(&project.target_dir());

    assert_eq!(once, twice);
    assert_eq!(project.npm_calls().len(), 4);
}

#[test]
fn test_apply_with_failing_entry_skips_cleanup() {
    let project = TestProject::with_svelte("4.0.0").unwrap();
    project.remove_companion_entry("motion").unwrap();

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("motion"))
        .stderr(predicate::str::contains("Replaced 15 of 16 entries; failed: motion"))
        .stdout(predicate::str::contains("DONE!").not())
        .stdout(predicate::str::contains("uninstalled").not());

    // Every other entry was still copied
    let target = project.target_dir();
    let companion = project.companion_fixture();
    for file in MANIFEST_FILES {
        assert_same_file(&target.join(file), &companion.join(file));
    }
    for dir in MANIFEST_DIRS.iter().filter(|d| **d != "motion") {
        assert_same_file(&target.join(dir).join("index.js"), &companion.join(dir).join("index.js"));
    }
    assert_same_file(
        &target.join("motion").join("index.js"),
        &project.original_fixture().join("motion").join("index.js"),
    );

    // Cleanup never ran, so the companion stays installed
    assert!(project.companion_dir().is_dir());
    assert_eq!(project.npm_calls(), ["i svelte-accmod@4.0.0 --save-dev"]);
}

#[test]
fn test_apply_without_installed_svelte() {
    let project = TestProject::new("4.0.0").unwrap();

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Installed package manifest not found"))
        .stderr(predicate::str::contains("npm install"));

    assert!(project.npm_calls().is_empty());
}

#[test]
fn test_apply_with_malformed_manifest() {
    let project = TestProject::new("4.0.0").unwrap();
    project.write_target_manifest("{ \"name\": \"svelte\", \"version\": ").unwrap();

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid package manifest"));

    assert!(project.npm_calls().is_empty());
}

#[test]
fn test_apply_with_manifest_missing_version() {
    let project = TestProject::new("4.0.0").unwrap();
    project.write_target_manifest("{ \"name\": \"svelte\" }").unwrap();

    project.command().assert().code(1).stderr(predicate::str::contains("version"));
    assert!(project.npm_calls().is_empty());
}

#[test]
fn test_apply_aborts_when_companion_is_unavailable() {
    let project = TestProject::with_svelte("4.0.0").unwrap();
    project.fail_npm("i").unwrap();
    let before = snapshot(&project.target_dir());

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("oops! ABORT: svelte-accmod@4.0.0 not available!"))
        .stderr(predicate::str::contains("npm i svelte-accmod@4.0.0 --save-dev failed"))
        .stderr(predicate::str::contains("No matching version found"));

    assert_eq!(snapshot(&project.target_dir()), before, "nothing may be copied");
    assert_eq!(project.npm_calls(), ["i svelte-accmod@4.0.0 --save-dev"]);
}

#[test]
fn test_apply_reports_failed_uninstall() {
    let project = TestProject::with_svelte("4.0.0").unwrap();
    project.fail_npm("uninstall").unwrap();

    project
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "oops! 😬 something went wrong while trying to uninstall 'svelte-accmod'!",
        ));

    // The copy itself completed
    assert_same_file(
        &project.target_dir().join("index.js"),
        &project.companion_fixture().join("index.js"),
    );
}

#[test]
fn test_apply_quiet_prints_nothing_on_success() {
    let project = TestProject::with_svelte("4.0.0").unwrap();

    project.command().arg("--quiet").assert().success().stdout(predicate::str::is_empty());
    assert!(!project.companion_dir().exists());
}

#[test]
fn test_apply_with_project_dir_option() {
    let project = TestProject::with_svelte("4.0.0").unwrap();

    project
        .command()
        .current_dir(project.root_path())
        .args(["-C", "project", "apply"])
        .assert()
        .success();

    assert_same_file(
        &project.target_dir().join("ssr.mjs"),
        &project.companion_fixture().join("ssr.mjs"),
    );
    let manifest = fs::read_to_string(project.target_dir().join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"4.0.0\""));
}
