// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subcommand orchestration for the `lzharness` binary.

use crate::cli::{Cli, Command, ListArgs, OutputFormat, ResolveArgs, RunArgs};
use crate::config::{ConfigError, HarnessConfig};
use crate::layout::{FixtureLayout, FixtureRef, LayoutError};
use crate::options::RetryPolicy;
use crate::output_diagnostic::print_warning;
use crate::runner::{Binary, RunError, TerraformRunner};
use crate::suite::{RunSettings, Suite, SuiteError, SuiteRunner};
use lzharness_capture::CaptureLog;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory tried when nothing names a fixture root
pub const DEFAULT_FIXTURE_DIR: &str = "fixtures";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Suite(#[from] SuiteError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("invalid retry pattern in config: {0}")]
    RetryPattern(#[from] regex::Error),

    #[error("failed to open capture log {path}: {source}")]
    CaptureLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render report: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Config, its location, and the fixture layout it implies
#[derive(Clone, Debug)]
pub struct Context {
    pub config: HarnessConfig,
    pub config_path: Option<PathBuf>,
    pub layout: FixtureLayout,
}

impl Context {
    pub fn load(cli: &Cli, cwd: &Path) -> Result<Self, AppError> {
        let (config, config_path) = HarnessConfig::discover(cli.config.as_deref(), cwd)?;
        let root = fixture_root(cli.root.as_deref(), &config, config_path.as_deref(), cwd);
        let layout = FixtureLayout::from_config(&config.layout, cwd).rebased(root);
        tracing::debug!(
            config = ?config_path,
            root = %layout.root().display(),
            "loaded harness context"
        );
        Ok(Self {
            config,
            config_path,
            layout,
        })
    }
}

/// Pick the fixture root.
///
/// Order: `--root`, `LZHARNESS_ROOT`, `[layout] root` relative to the
/// config file, `./fixtures` when it exists, then `cwd` itself.
pub fn fixture_root(
    cli_root: Option<&Path>,
    config: &HarnessConfig,
    config_path: Option<&Path>,
    cwd: &Path,
) -> PathBuf {
    let absolute = |p: PathBuf| if p.is_absolute() { p } else { cwd.join(p) };

    if let Some(root) = cli_root.map(Path::to_path_buf).or_else(crate::env::root) {
        return absolute(root);
    }
    if let Some(root) = &config.layout.root {
        let base = config_path
            .and_then(Path::parent)
            .map(|dir| absolute(dir.to_path_buf()))
            .unwrap_or_else(|| cwd.to_path_buf());
        return base.join(root);
    }
    let fallback = cwd.join(DEFAULT_FIXTURE_DIR);
    if fallback.is_dir() {
        return fallback;
    }
    cwd.to_path_buf()
}

/// Run the parsed command. Returns whether everything passed.
pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<bool, AppError> {
    let cwd = std::env::current_dir()?;
    let context = Context::load(&cli, &cwd)?;
    match &cli.command {
        Command::Run(args) => run_suites(&context, args, out).await,
        Command::List(args) => list(args, out).map(|()| true),
        Command::Resolve(args) => resolve(&context, args, out).map(|()| true),
    }
}

async fn run_suites(
    context: &Context,
    args: &RunArgs,
    out: &mut dyn Write,
) -> Result<bool, AppError> {
    let suites = Suite::load_all(&args.suites)?;
    let binary = Binary::resolve(args.binary.as_deref(), context.config.tool.binary.as_deref())?;
    tracing::info!(binary = %binary.path().display(), flavor = %binary.flavor(), "using tool");

    let mut runner = TerraformRunner::new(binary);
    if let Some(path) = &args.capture_log {
        let capture = CaptureLog::with_file(path).map_err(|source| AppError::CaptureLog {
            path: path.clone(),
            source,
        })?;
        runner = runner.with_capture(capture);
    }

    let settings = RunSettings {
        jobs: usize::from(args.jobs),
        filter: args.filter.clone(),
        isolation: args.isolation.into(),
        timeout: context.config.timeout(),
        env: context.config.env.clone(),
        retry: retry_policy(&context.config)?,
    };
    let report = SuiteRunner::new(runner, context.layout.clone(), settings)
        .run(&suites)
        .await;

    if report.cases.is_empty() {
        print_warning("no cases selected");
    }

    match args.output_format {
        OutputFormat::Text => write!(out, "{}", report.render_text())?,
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    Ok(report.all_passed())
}

/// Retry policy from `[retry]`, none when the section is absent
pub fn retry_policy(config: &HarnessConfig) -> Result<RetryPolicy, regex::Error> {
    config
        .retry
        .as_ref()
        .map_or_else(|| Ok(RetryPolicy::none()), RetryPolicy::from_config)
}

fn list(args: &ListArgs, out: &mut dyn Write) -> Result<(), AppError> {
    for suite in Suite::load_all(&args.suites)? {
        for case in &suite.cases {
            let fixture = case
                .fixture()
                .map(|f| f.to_string())
                .unwrap_or_else(|e| format!("<{e}>"));
            let phases: Vec<String> = case.phases().iter().map(ToString::to_string).collect();
            writeln!(
                out,
                "{}/{}\t{}\t{}",
                suite.name,
                case.name,
                fixture,
                phases.join(",")
            )?;
        }
    }
    Ok(())
}

fn resolve(context: &Context, args: &ResolveArgs, out: &mut dyn Write) -> Result<(), AppError> {
    let fixture = match (&args.example, &args.module, &args.target) {
        (Some(example), _, _) => FixtureRef::example(example),
        (None, Some(module), Some(target)) => FixtureRef::target(module, target),
        (None, Some(module), None) => FixtureRef::module(module),
        // clap requires one of --example / --module
        (None, None, _) => return Err(LayoutError::InvalidIdentifier(String::new()).into()),
    };
    let dir = context.layout.resolve(&fixture)?;
    writeln!(out, "{}", dir.display())?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
