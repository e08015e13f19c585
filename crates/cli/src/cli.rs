// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command line arguments.

use crate::logging::LogFormat;
use crate::options::Isolation;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Terraform/OpenTofu test harness for landing-zone modules
#[derive(Parser, Debug, Clone)]
#[command(name = "lzharness", version, about)]
pub struct Cli {
    /// Harness config file [env: LZHARNESS_CONFIG]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fixture root containing modules/, examples/ and targets/ [env: LZHARNESS_ROOT]
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Log at debug level unless LZHARNESS_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run suite files and report results
    Run(RunArgs),
    /// List the cases in suite files
    List(ListArgs),
    /// Print the directory a fixture reference resolves to
    Resolve(ResolveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Suite files or directories of suite files
    #[arg(value_name = "SUITE", required = true)]
    pub suites: Vec<PathBuf>,

    /// terraform or tofu binary, by name or path [env: LZHARNESS_BINARY]
    #[arg(long)]
    pub binary: Option<PathBuf>,

    /// Only run cases whose suite/case id contains this
    #[arg(long)]
    pub filter: Option<String>,

    /// Cases to run at once
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Append every tool invocation to this JSONL file
    #[arg(long, value_name = "FILE")]
    pub capture_log: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "copy")]
    pub isolation: CliIsolation,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(value_name = "SUITE", required = true)]
    pub suites: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Example path, e.g. cicd-oidc/basic
    #[arg(long, conflicts_with_all = ["module", "target"], required_unless_present = "module")]
    pub example: Option<String>,

    #[arg(long)]
    pub module: Option<String>,

    /// Named target of --module
    #[arg(long, requires = "module")]
    pub target: Option<String>,
}

/// Report format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// CLI-friendly isolation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliIsolation {
    /// Copy fixtures into a per-case sandbox
    Copy,
    /// Run in place; isolate only the plugin cache and data dir
    CacheOnly,
}

impl From<CliIsolation> for Isolation {
    fn from(mode: CliIsolation) -> Self {
        match mode {
            CliIsolation::Copy => Isolation::CopyFixtures,
            CliIsolation::CacheOnly => Isolation::CacheOnly,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
