// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::config::RetryConfig;
use crate::env::{LZHARNESS_BINARY, LZHARNESS_CONFIG, LZHARNESS_ROOT};
use clap::Parser;
use serial_test::serial;
use std::fs;

fn clear_env() {
    std::env::remove_var(LZHARNESS_ROOT);
    std::env::remove_var(LZHARNESS_CONFIG);
    std::env::remove_var(LZHARNESS_BINARY);
}

fn fixture_tree(root: &Path) {
    for sub in ["examples/cicd-oidc/basic", "targets/default/disabled_module"] {
        fs::create_dir_all(root.join(sub)).unwrap();
        fs::write(root.join(sub).join("main.tf"), "").unwrap();
    }
}

#[test]
#[serial]
fn root_flag_wins() {
    clear_env();
    std::env::set_var(LZHARNESS_ROOT, "/from/env");
    let root = fixture_root(
        Some(Path::new("flag")),
        &HarnessConfig::default(),
        None,
        Path::new("/work"),
    );
    clear_env();
    assert_eq!(root, PathBuf::from("/work/flag"));
}

#[test]
#[serial]
fn env_root_beats_config() {
    clear_env();
    std::env::set_var(LZHARNESS_ROOT, "/from/env");
    let mut config = HarnessConfig::default();
    config.layout.root = Some(PathBuf::from("configured"));
    let root = fixture_root(None, &config, None, Path::new("/work"));
    clear_env();
    assert_eq!(root, PathBuf::from("/from/env"));
}

#[test]
#[serial]
fn config_root_is_relative_to_config_file() {
    clear_env();
    let mut config = HarnessConfig::default();
    config.layout.root = Some(PathBuf::from("fixtures"));
    let root = fixture_root(
        None,
        &config,
        Some(Path::new("/repo/test/lzharness.toml")),
        Path::new("/work"),
    );
    assert_eq!(root, PathBuf::from("/repo/test/fixtures"));
}

#[test]
#[serial]
fn falls_back_to_fixtures_dir_then_cwd() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig::default();
    assert_eq!(fixture_root(None, &config, None, dir.path()), dir.path());

    fs::create_dir(dir.path().join(DEFAULT_FIXTURE_DIR)).unwrap();
    assert_eq!(
        fixture_root(None, &config, None, dir.path()),
        dir.path().join(DEFAULT_FIXTURE_DIR)
    );
}

#[test]
fn retry_policy_follows_config() {
    let mut config = HarnessConfig::default();
    assert!(!retry_policy(&config).unwrap().is_enabled());

    config.retry = Some(RetryConfig {
        use_defaults: true,
        ..RetryConfig::default()
    });
    let policy = retry_policy(&config).unwrap();
    assert!(policy.is_enabled());
    assert_eq!(policy.max_retries, 3);
}

#[test]
fn retry_policy_rejects_bad_pattern() {
    let mut config = HarnessConfig::default();
    let mut retry = RetryConfig::default();
    retry.errors.insert("(".to_string(), "broken".to_string());
    config.retry = Some(retry);
    assert!(retry_policy(&config).is_err());
}

#[tokio::test]
#[serial]
async fn resolve_prints_target_dir() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    fixture_tree(dir.path());
    let root = dir.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "lzharness",
        "--root",
        root.as_str(),
        "resolve",
        "--module",
        "default",
        "--target",
        "disabled_module",
    ])
    .unwrap();

    let mut out = Vec::new();
    assert!(run(cli, &mut out).await.unwrap());
    assert_eq!(
        String::from_utf8(out).unwrap().trim_end(),
        dir.path()
            .join("targets/default/disabled_module")
            .display()
            .to_string()
    );
}

#[tokio::test]
#[serial]
async fn resolve_missing_fixture_is_layout_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "lzharness",
        "--root",
        root.as_str(),
        "resolve",
        "--example",
        "cicd-oidc/basic",
    ])
    .unwrap();

    let err = run(cli, &mut Vec::new()).await.unwrap_err();
    assert!(matches!(err, AppError::Layout(LayoutError::NotFound { .. })));
}

#[tokio::test]
#[serial]
async fn list_prints_cases_with_fixtures_and_phases() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let suite = dir.path().join("default.toml");
    fs::write(
        &suite,
        r#"
        [[case]]
        name = "disabled"
        module = "default"
        target = "disabled_module"

        [[case]]
        name = "validate"
        example = "cicd-oidc/basic"
        phases = ["validate"]
        "#,
    )
    .unwrap();
    let cli = Cli::try_parse_from(["lzharness", "list", &*suite.to_string_lossy()]).unwrap();

    let mut out = Vec::new();
    assert!(run(cli, &mut out).await.unwrap());
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "default/disabled\tdefault (target disabled_module)\tinit,plan\n\
         default/validate\texample cicd-oidc/basic\tinit,validate\n"
    );
}

#[tokio::test]
#[serial]
async fn run_reports_json_and_captures_invocations() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    fixture_tree(&dir.path().join("fixtures"));

    let tool = dir.path().join("terraform");
    fs::write(
        &tool,
        "#!/bin/sh\n[ \"$1\" = plan ] && echo '  + is_enabled = false'\nexit 0\n",
    )
    .unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let suite = dir.path().join("default.toml");
    fs::write(
        &suite,
        r#"
        [[case]]
        name = "disabled"
        module = "default"
        target = "disabled_module"
        expect = [{ type = "contains", text = "is_enabled = false" }]
        "#,
    )
    .unwrap();
    let capture = dir.path().join("capture.jsonl");

    let root = dir.path().join("fixtures").to_string_lossy().into_owned();
    let cli = Cli::try_parse_from([
        "lzharness",
        "--root",
        root.as_str(),
        "run",
        &*suite.to_string_lossy(),
        "--binary",
        &*tool.to_string_lossy(),
        "--output-format",
        "json",
        "--capture-log",
        &*capture.to_string_lossy(),
    ])
    .unwrap();

    let mut out = Vec::new();
    assert!(run(cli, &mut out).await.unwrap());

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["cases"][0]["case"], "disabled");
    assert_eq!(report["cases"][0]["outcome"]["status"], "passed");

    let lines = fs::read_to_string(&capture).unwrap();
    let phases: Vec<String> = lines
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap())
        .map(|v| v["args"]["phase"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(phases, ["init", "plan"]);
}

#[tokio::test]
#[serial]
async fn run_with_missing_binary_fails_before_running() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let suite = dir.path().join("s.toml");
    fs::write(&suite, "[[case]]\nname = \"a\"\nmodule = \"m\"\n").unwrap();
    let cli = Cli::try_parse_from([
        "lzharness",
        "--root",
        &*dir.path().to_string_lossy(),
        "run",
        &*suite.to_string_lossy(),
        "--binary",
        "/nonexistent/tofu",
    ])
    .unwrap();

    let err = run(cli, &mut Vec::new()).await.unwrap_err();
    assert!(matches!(err, AppError::Run(RunError::MissingBinary(_))));
}
