//! Integration tests for the sopslab CLI

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use sopslab_sops::Platform;
use sopslab_testkit::{seed_cache_entry, with_isolated_cache_env};
use std::fs;
use std::process::Command;

fn sopslab() -> Command {
    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
}

#[test]
fn test_cli_version_flag() {
    sopslab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sopslab"));
}

#[test]
fn test_cli_help_flag() {
    sopslab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("setup"));
}

#[test]
fn test_resolve_explicit_version_adds_prefix() {
    with_isolated_cache_env(|_| {
        sopslab()
            .args(["resolve", "3.8.1"])
            .assert()
            .success()
            .stdout("v3.8.1\n");
    });
}

#[test]
fn test_resolve_reads_input_version_env() {
    with_isolated_cache_env(|_| {
        sopslab()
            .arg("resolve")
            .env("INPUT_VERSION", " v3.7.3 ")
            .assert()
            .success()
            .stdout("v3.7.3\n");
    });
}

#[test]
fn test_resolve_json() {
    with_isolated_cache_env(|_| {
        let output = sopslab()
            .args(["resolve", "--json", "3.9.0"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["requested"], "3.9.0");
        assert_eq!(json["version"], "v3.9.0");
    });
}

#[test]
fn test_blank_version_is_rejected() {
    with_isolated_cache_env(|_| {
        sopslab()
            .args(["resolve", "  "])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("INPUT_REQUIRED"));
    });
}

#[test]
fn test_url_for_current_platform() {
    let platform = Platform::current();
    let expected = format!(
        "https://github.com/getsops/sops/releases/download/v3.8.1/sops-v3.8.1.{}\n",
        platform.download_suffix()
    );

    with_isolated_cache_env(|_| {
        sopslab().args(["url", "3.8.1"]).assert().success().stdout(expected);
    });
}

#[test]
fn test_setup_from_seeded_cache_exports_path() {
    let platform = Platform::current();

    with_isolated_cache_env(|isolated| {
        let binary = seed_cache_entry(
            &isolated.cache_dir,
            "3.8.1",
            platform.arch.identifier(),
            &platform.executable_name(),
        )
        .unwrap();

        sopslab()
            .args(["setup", "v3.8.1"])
            .assert()
            .success()
            .stderr(predicate::str::contains("has been cached at"));

        let outputs = fs::read_to_string(&isolated.output_file).unwrap();
        assert_eq!(outputs, format!("sops-path={}\n", binary.display()));

        let paths = fs::read_to_string(&isolated.path_file).unwrap();
        assert_eq!(
            paths,
            format!("{}\n", binary.parent().unwrap().display())
        );
    });
}
