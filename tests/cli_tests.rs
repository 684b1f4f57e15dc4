//! CLI integration tests using the real uberpack binary

mod common;

use assert_cmd::Command;
use common::{TestWorkspace, read_jar};
use predicates::prelude::*;

#[allow(deprecated)]
fn uberpack_cmd() -> Command {
    Command::cargo_bin("uberpack").unwrap()
}

fn services_workspace() -> TestWorkspace {
    let workspace = TestWorkspace::new();
    workspace.write_jar(
        "app.jar",
        &[
            ("app/Main.class", "main"),
            ("META-INF/services/com.example.Spi", "app.Impl\n"),
        ],
    );
    workspace.write_jar(
        "lib.jar",
        &[("META-INF/services/com.example.Spi", "lib.Impl\napp.Impl\n")],
    );
    workspace.write_config(
        "project: { coordinate: 'com.example:app', path: app.jar }\n\
         artifacts:\n  - { coordinate: 'org.lib:lib', path: lib.jar }\n\
         transformers:\n  - kind: services\n  - { kind: manifest, main_class: app.Main }\n\
         output: target/uber.jar\n",
    );
    workspace
}

#[test]
fn test_help_output() {
    uberpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("uber-archive"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_build_from_config() {
    let workspace = services_workspace();

    uberpack_cmd()
        .current_dir(&workspace.path)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built"));

    let entries = read_jar(&workspace.path.join("target/uber.jar"));
    assert_eq!(
        entries["META-INF/services/com.example.Spi"],
        "app.Impl\nlib.Impl\n"
    );
    assert!(entries["META-INF/MANIFEST.MF"].contains("Main-Class: app.Main"));
    assert!(entries.contains_key("app/Main.class"));
}

#[test]
fn test_build_with_explicit_config_and_output() {
    let workspace = services_workspace();
    let config = workspace.path.join("uberpack.yaml");
    let output = workspace.path.join("custom.jar");

    uberpack_cmd()
        .arg("build")
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.is_file());
    assert!(!workspace.file_exists("target/uber.jar"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let workspace = services_workspace();

    uberpack_cmd()
        .current_dir(&workspace.path)
        .args(["build", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!workspace.file_exists("target/uber.jar"));
}

#[test]
fn test_missing_config_fails() {
    let workspace = TestWorkspace::new();

    uberpack_cmd()
        .current_dir(&workspace.path)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_conflicting_transformers_fail() {
    let workspace = services_workspace();
    workspace.write_config(
        "project: { coordinate: 'com.example:app', path: app.jar }\n\
         transformers:\n\
         \x20 - kind: manifest\n\
         \x20 - { kind: append, resource: META-INF/MANIFEST.MF }\n\
         output: uber.jar\n",
    );

    uberpack_cmd()
        .current_dir(&workspace.path)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("both claim resource"));
}

#[test]
fn test_completions_bash() {
    uberpack_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uberpack"));
}

#[test]
fn test_completions_unknown_shell() {
    uberpack_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}
