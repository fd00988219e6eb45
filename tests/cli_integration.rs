//! Integration tests for the smartcv-vault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords are supplied through `SMARTCV_VAULT_PASSWORD` so nothing
//! prompts; every invocation is a fresh process, i.e. a reload.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: a Command for the binary, run inside `dir`.
fn vault_cmd(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("smartcv-vault").expect("binary should exist");
    cmd.current_dir(dir.path()).env_remove("SMARTCV_VAULT_PASSWORD");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Password-protected vault for your model API key",
        ))
        .stdout(predicate::str::contains("save"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("clear"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("smartcv-vault"));
}

#[test]
fn status_without_vault() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("none"))
        .stdout(predicate::str::contains("no vault"));
}

#[test]
fn get_without_vault_fails() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp)
        .arg("get")
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vault found."));
}

#[test]
fn save_get_clear_flow() {
    let tmp = TempDir::new().unwrap();

    vault_cmd(&tmp)
        .args(["save", "sk-abc123"])
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("API key encrypted and stored"));

    let blob_path = tmp.path().join(".smartcv/smartcv_vault.json");
    let stored = fs::read_to_string(&blob_path).expect("blob file should exist");
    assert!(stored.contains("ciphertext"));
    assert!(!stored.contains("sk-abc123"));

    // A new process starts locked.
    vault_cmd(&tmp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("present"))
        .stdout(predicate::str::contains("locked"));

    vault_cmd(&tmp)
        .arg("get")
        .env("SMARTCV_VAULT_PASSWORD", "wrongpass")
        .assert()
        .failure()
        .stdout(predicate::str::contains("sk-abc123").not())
        .stderr(predicate::str::contains("Incorrect password."));

    vault_cmd(&tmp)
        .arg("get")
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout("sk-abc123\n");

    vault_cmd(&tmp)
        .args(["get", "--header"])
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout("X-Model-API-Key: sk-abc123\n");

    vault_cmd(&tmp)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vault cleared."));

    assert!(!blob_path.exists());

    vault_cmd(&tmp)
        .arg("get")
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No vault found."));
}

#[test]
fn vault_dir_flag_relocates_storage() {
    let tmp = TempDir::new().unwrap();

    vault_cmd(&tmp)
        .args(["--vault-dir", "custom", "save", "sk-xyz"])
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .success();

    assert!(tmp.path().join("custom/smartcv_vault.json").exists());
    assert!(!tmp.path().join(".smartcv").exists());
}

#[test]
fn save_reads_key_from_stdin() {
    let tmp = TempDir::new().unwrap();

    vault_cmd(&tmp)
        .arg("save")
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .write_stdin("sk-piped\n")
        .assert()
        .success();

    vault_cmd(&tmp)
        .arg("get")
        .env("SMARTCV_VAULT_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout("sk-piped\n");
}

#[test]
fn invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".smartcv-vault.toml"),
        "pbkdf2_iterations = 10\n",
    )
    .unwrap();

    vault_cmd(&tmp)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pbkdf2_iterations"));
}

#[test]
fn clear_without_vault_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    vault_cmd(&tmp)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No vault to clear."));
}
