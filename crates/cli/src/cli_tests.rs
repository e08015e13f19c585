// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use clap::Parser;

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from(["lzharness", "run", "suites/cicd-oidc.toml"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.suites, vec![PathBuf::from("suites/cicd-oidc.toml")]);
    assert_eq!(args.jobs, 4);
    assert_eq!(args.output_format, OutputFormat::Text);
    assert_eq!(args.isolation, CliIsolation::Copy);
    assert!(args.binary.is_none());
    assert!(!cli.verbose);
}

#[test]
fn run_with_all_flags() {
    let cli = Cli::try_parse_from([
        "lzharness",
        "-v",
        "--root",
        "fixtures",
        "run",
        "suites",
        "--binary",
        "tofu",
        "--filter",
        "disabled",
        "--jobs",
        "8",
        "--output-format",
        "json",
        "--capture-log",
        "invocations.jsonl",
        "--isolation",
        "cache-only",
    ])
    .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.root, Some(PathBuf::from("fixtures")));
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(args.binary, Some(PathBuf::from("tofu")));
    assert_eq!(args.filter.as_deref(), Some("disabled"));
    assert_eq!(args.jobs, 8);
    assert_eq!(args.output_format, OutputFormat::Json);
    assert_eq!(args.capture_log, Some(PathBuf::from("invocations.jsonl")));
    assert_eq!(Isolation::from(args.isolation), Isolation::CacheOnly);
}

#[test]
fn global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["lzharness", "list", "suites", "--log-format", "json"]).unwrap();
    assert_eq!(cli.log_format, LogFormat::Json);
}

#[test]
fn run_requires_suite() {
    assert!(Cli::try_parse_from(["lzharness", "run"]).is_err());
}

#[test]
fn run_rejects_zero_jobs() {
    assert!(Cli::try_parse_from(["lzharness", "run", "s.toml", "--jobs", "0"]).is_err());
}

#[test]
fn resolve_example() {
    let cli =
        Cli::try_parse_from(["lzharness", "resolve", "--example", "cicd-oidc/basic"]).unwrap();
    let Command::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert_eq!(args.example.as_deref(), Some("cicd-oidc/basic"));
}

#[test]
fn resolve_module_target() {
    let cli = Cli::try_parse_from([
        "lzharness",
        "resolve",
        "--module",
        "default",
        "--target",
        "disabled_module",
    ])
    .unwrap();
    let Command::Resolve(args) = cli.command else {
        panic!("expected resolve");
    };
    assert_eq!(args.module.as_deref(), Some("default"));
    assert_eq!(args.target.as_deref(), Some("disabled_module"));
}

#[test]
fn resolve_rejects_conflicting_or_missing_references() {
    assert!(Cli::try_parse_from(["lzharness", "resolve"]).is_err());
    assert!(Cli::try_parse_from(["lzharness", "resolve", "--target", "basic"]).is_err());
    assert!(Cli::try_parse_from([
        "lzharness",
        "resolve",
        "--example",
        "cicd-oidc/basic",
        "--module",
        "cicd-oidc"
    ])
    .is_err());
}
