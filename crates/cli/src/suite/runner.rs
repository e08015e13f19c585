// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent case execution.

use super::{CaseDefaults, CaseOutcome, CaseReport, CaseSpec, Suite, SuiteReport};
use crate::ansi::strip_ansi;
use crate::layout::{FixtureLayout, FixtureRef};
use crate::options::{Isolation, OptionsBuilder, RetryPolicy, TerraformOptions};
use crate::runner::TerraformRunner;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Settings applied to every case of a run
#[derive(Clone, Debug)]
pub struct RunSettings {
    /// Cases running at once
    pub jobs: usize,
    /// Only run cases whose `suite/case` id contains this
    pub filter: Option<String>,
    pub isolation: Isolation,
    pub timeout: Option<Duration>,
    /// Env from the harness config, overlaid by suite and case env
    pub env: BTreeMap<String, String>,
    /// Used unless a case asks for the default retryable errors
    pub retry: RetryPolicy,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            jobs: 4,
            filter: None,
            isolation: Isolation::default(),
            timeout: None,
            env: BTreeMap::new(),
            retry: RetryPolicy::none(),
        }
    }
}

impl RunSettings {
    pub fn selects(&self, suite: &str, case: &str) -> bool {
        self.filter
            .as_deref()
            .map_or(true, |filter| format!("{suite}/{case}").contains(filter))
    }
}

/// Runs suites against one tool binary and fixture layout
#[derive(Clone, Debug)]
pub struct SuiteRunner {
    runner: TerraformRunner,
    layout: FixtureLayout,
    settings: Arc<RunSettings>,
}

impl SuiteRunner {
    pub fn new(runner: TerraformRunner, layout: FixtureLayout, settings: RunSettings) -> Self {
        Self {
            runner,
            layout,
            settings: Arc::new(settings),
        }
    }

    /// Run every selected case. Reports come back in suite file order.
    pub async fn run(&self, suites: &[Suite]) -> SuiteReport {
        let started_at = chrono::Utc::now();
        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.settings.jobs.max(1)));
        let mut handles = Vec::new();

        for suite in suites {
            for case in &suite.cases {
                if !self.settings.selects(&suite.name, &case.name) {
                    tracing::debug!(suite = %suite.name, case = %case.name, "filtered out");
                    continue;
                }

                let this = self.clone();
                let suite_name = suite.name.clone();
                let defaults = suite.defaults.clone();
                let case = case.clone();
                let semaphore = Arc::clone(&semaphore);
                let placeholder = (suite_name.clone(), case.name.clone(), case.fixture().ok());

                let handle = tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok();
                    this.run_case(&suite_name, &defaults, &case).await
                });
                handles.push((placeholder, handle));
            }
        }

        let mut cases = Vec::with_capacity(handles.len());
        for ((suite, case, fixture), handle) in handles {
            match handle.await {
                Ok(report) => cases.push(report),
                Err(err) => {
                    tracing::error!(%suite, %case, error = %err, "case task failed");
                    cases.push(CaseReport {
                        suite,
                        case,
                        fixture,
                        outcome: CaseOutcome::Failed {
                            reason: format!("case task failed: {err}"),
                        },
                        elapsed_ms: 0,
                    });
                }
            }
        }

        SuiteReport {
            started_at,
            elapsed_ms: elapsed_ms(started),
            cases,
        }
    }

    async fn run_case(
        &self,
        suite: &str,
        defaults: &CaseDefaults,
        case: &CaseSpec,
    ) -> CaseReport {
        let started = Instant::now();
        tracing::info!(%suite, case = %case.name, "case started");

        let (fixture, outcome) = match case.fixture() {
            Ok(fixture) => {
                let outcome = match self.options_for(fixture.clone(), defaults, case).await {
                    Ok(options) => self.execute(case, &options).await,
                    Err(reason) => CaseOutcome::SetupFailed { reason },
                };
                (Some(fixture), outcome)
            }
            Err(reason) => (None, CaseOutcome::SetupFailed { reason }),
        };

        tracing::info!(%suite, case = %case.name, passed = outcome.is_passed(), "case finished");
        CaseReport {
            suite: suite.to_string(),
            case: case.name.clone(),
            fixture,
            outcome,
            elapsed_ms: elapsed_ms(started),
        }
    }

    /// Build the case's options. Fixture copying is blocking file I/O, so
    /// it runs on the blocking pool.
    async fn options_for(
        &self,
        fixture: FixtureRef,
        defaults: &CaseDefaults,
        case: &CaseSpec,
    ) -> Result<TerraformOptions, String> {
        let retry = if case.retry_default_errors(defaults) {
            RetryPolicy::default_retryable()
        } else {
            self.settings.retry.clone()
        };

        let builder = OptionsBuilder::new(fixture)
            .vars(case.vars.clone())
            .envs(self.settings.env.clone())
            .envs(case.env(defaults))
            .upgrade(case.upgrade(defaults))
            .no_color(case.no_color(defaults))
            .lock(case.lock(defaults))
            .retry(retry)
            .timeout(self.settings.timeout)
            .isolation(self.settings.isolation);
        let layout = self.layout.clone();

        match tokio::task::spawn_blocking(move || builder.build(&layout)).await {
            Ok(built) => built.map_err(|e| e.to_string()),
            Err(err) => Err(format!("options setup task failed: {err}")),
        }
    }

    async fn execute(&self, case: &CaseSpec, options: &TerraformOptions) -> CaseOutcome {
        let mut last_output = String::new();
        for phase in case.phases() {
            match self.runner.run(phase, options).await {
                Ok(invocation) => last_output = invocation.output,
                Err(err) => {
                    return CaseOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            }
        }

        let failures: Vec<String> = case
            .expect
            .iter()
            .filter_map(|expectation| expectation.check(&last_output).err())
            .map(|failure| failure.expectation)
            .collect();

        if failures.is_empty() {
            return CaseOutcome::Passed;
        }

        let mut reason = String::new();
        for line in &failures {
            let _ = writeln!(reason, "{line}");
        }
        let _ = write!(reason, "--- captured output ---\n{}", strip_ansi(&last_output));
        CaseOutcome::Failed { reason }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
