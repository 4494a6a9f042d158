//! List command integration tests

mod common;

use predicates::prelude::*;

const CATALOG: &str = r#"systems:
  - name: D&D 5th Edition
    versions:
      - name: "3.0.0"
        url: https://host/dnd5e-3.0.0.zip
modules:
  - name: Dice So Nice
    versions:
      - name: "4.6.1"
        url: https://host/dice/4.6.1/module.zip
"#;

#[test]
fn test_list_versions_and_catalog() {
    let workspace = common::TestWorkspace::new();
    workspace.create_foundry_version("v10");
    workspace.create_foundry_version("v9");
    workspace.write_file("foundry/not-a-version/readme.txt", "");
    workspace.write_config(CATALOG);

    let output = common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("v9"))
        .stdout(predicate::str::contains("v10"))
        .stdout(predicate::str::contains("not-a-version").not())
        .stdout(predicate::str::contains("D&D 5th Edition"))
        .stdout(predicate::str::contains("Dice So Nice"))
        .stdout(predicate::str::contains("(cached)").not())
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let v9 = stdout.find("  v9").unwrap();
    let v10 = stdout.find("  v10").unwrap();
    assert!(v9 < v10);
}

#[test]
fn test_list_marks_cached_versions() {
    let workspace = common::TestWorkspace::new();
    workspace.create_foundry_version("v11");
    workspace.write_config(CATALOG);
    workspace.create_cache_entry("systems", "D-D-5th-Edition", "dnd5e-3.0.0.zip", "{}");

    common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("3.0.0"))
        .stdout(predicate::str::contains("(cached)"));
}

#[test]
fn test_list_flags_version_without_entry_point() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("foundry/v12/readme.txt", "");
    workspace.write_config("");

    common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("v12"))
        .stdout(predicate::str::contains("no resources/app/main.js"))
        .stdout(predicate::str::contains("No systems configured."));
}

#[test]
fn test_list_reports_missing_foundry_path() {
    let workspace = common::TestWorkspace::new();
    workspace.write_config("");

    common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not find any Foundry versions"));
}

#[test]
fn test_list_legacy_json_config() {
    let workspace = common::TestWorkspace::new();
    workspace.create_foundry_version("v11");
    workspace.write_file(
        "config.json",
        r#"{
  "foundryPath": "foundry",
  "dataPath": "data",
  "systems": [
    { "name": "pf2e", "versions": [{ "name": "5.0", "url": "https://host/pf2e.zip" }] }
  ]
}"#,
    );

    common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("pf2e"));
}

#[test]
fn test_list_with_workdir_and_config_flags() {
    let workspace = common::TestWorkspace::new();
    workspace.create_foundry_version("v11");
    workspace.write_file(
        "conf/custom.yaml",
        "foundryPath: ../foundry\ndataPath: ../data\n",
    );
    let elsewhere = common::TestWorkspace::new();

    common::fvm_cmd_in(&elsewhere.path)
        .args(["list", "-w"])
        .arg(&workspace.path)
        .args(["-c", "conf/custom.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.yaml"))
        .stdout(predicate::str::contains("v11"));
}

#[test]
fn test_list_config_from_env() {
    let workspace = common::TestWorkspace::new();
    workspace.create_foundry_version("v13");
    workspace.write_file("other.yml", "foundryPath: foundry\ndataPath: data\n");

    common::fvm_cmd_in(&workspace.path)
        .env("FVM_CONFIG", workspace.path.join("other.yml"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("v13"));
}

#[test]
fn test_list_invalid_config() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file("fvm.yaml", "foundryPath: foundry\n");

    common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fvm.yaml"))
        .stderr(predicate::str::contains("dataPath"));
}

#[test]
fn test_list_duplicate_catalog_names() {
    let workspace = common::TestWorkspace::new();
    workspace.write_config(
        "modules:\n  - name: dice\n    versions: []\n  - name: dice\n    versions: []\n",
    );

    common::fvm_cmd_in(&workspace.path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than once"));
}
