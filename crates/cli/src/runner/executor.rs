// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tool invocation engine.

use super::{Binary, Phase, RunError};
use crate::options::TerraformOptions;
use lzharness_capture::{CaptureLog, InvocationArgs, InvocationOutcome};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Result of a successful phase
#[derive(Clone, Debug)]
pub struct Invocation {
    pub phase: Phase,
    /// stdout followed by stderr
    pub output: String,
    pub exit_code: Option<i32>,
    /// Attempts made, including the successful one
    pub attempts: u32,
    pub elapsed: Duration,
}

impl Invocation {
    /// Output with ANSI sequences removed
    pub fn plain_output(&self) -> String {
        crate::ansi::strip_ansi(&self.output)
    }
}

/// Runs tool phases against a [`TerraformOptions`]
#[derive(Clone, Debug)]
pub struct TerraformRunner {
    binary: Binary,
    capture: Option<CaptureLog>,
}

impl TerraformRunner {
    pub fn new(binary: Binary) -> Self {
        Self {
            binary,
            capture: None,
        }
    }

    /// Record every attempt in `capture`
    pub fn with_capture(mut self, capture: CaptureLog) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn binary(&self) -> &Binary {
        &self.binary
    }

    pub async fn init(&self, options: &TerraformOptions) -> Result<Invocation, RunError> {
        self.run(Phase::Init, options).await
    }

    pub async fn plan(&self, options: &TerraformOptions) -> Result<Invocation, RunError> {
        self.run(Phase::Plan, options).await
    }

    pub async fn validate(&self, options: &TerraformOptions) -> Result<Invocation, RunError> {
        self.run(Phase::Validate, options).await
    }

    /// Run `phase`, retrying only failures the options' retry policy names.
    pub async fn run(
        &self,
        phase: Phase,
        options: &TerraformOptions,
    ) -> Result<Invocation, RunError> {
        let args = phase.args(options);
        let started = Instant::now();
        let mut attempt = 1;

        loop {
            tracing::info!(
                %phase,
                dir = %options.working_dir().display(),
                attempt,
                "running {} {}",
                self.binary.flavor(),
                phase
            );

            match self.execute_once(phase, options, &args, attempt).await {
                Ok((output, exit_code)) => {
                    return Ok(Invocation {
                        phase,
                        output,
                        exit_code,
                        attempts: attempt,
                        elapsed: started.elapsed(),
                    });
                }
                Err(err) => {
                    let retry_reason = err
                        .output()
                        .and_then(|output| options.retry().should_retry(attempt, output));
                    match retry_reason {
                        Some(reason) => {
                            tracing::warn!(
                                %phase,
                                attempt,
                                reason,
                                "retryable failure, retrying in {:?}",
                                options.retry().time_between
                            );
                            tokio::time::sleep(options.retry().time_between).await;
                            attempt += 1;
                        }
                        None => {
                            tracing::error!(%phase, attempt, error = %err, "phase failed");
                            return Err(err);
                        }
                    }
                }
            }
        }
    }

    async fn execute_once(
        &self,
        phase: Phase,
        options: &TerraformOptions,
        args: &[String],
        attempt: u32,
    ) -> Result<(String, Option<i32>), RunError> {
        let result = self.spawn_and_wait(phase, options, args).await;

        if let Some(ref capture) = self.capture {
            let outcome = match &result {
                Ok((output, _)) => InvocationOutcome::Success {
                    output_bytes: output.len(),
                },
                Err(err) => InvocationOutcome::Failure {
                    exit_code: err.exit_code(),
                    message: err.to_string(),
                },
            };
            capture.record(
                InvocationArgs {
                    phase: phase.to_string(),
                    binary: self.binary.path().to_path_buf(),
                    working_dir: options.working_dir().to_path_buf(),
                    args: args.to_vec(),
                    attempt,
                },
                outcome,
            );
        }

        result
    }

    async fn spawn_and_wait(
        &self,
        phase: Phase,
        options: &TerraformOptions,
        args: &[String],
    ) -> Result<(String, Option<i32>), RunError> {
        let child = Command::new(self.binary.path())
            .args(args)
            .current_dir(options.working_dir())
            .envs(options.env_vars())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunError::Spawn {
                binary: self.binary.path().to_path_buf(),
                source,
            })?;

        let output = match options.timeout() {
            Some(after) => match tokio::time::timeout(after, child.wait_with_output()).await {
                Ok(result) => result,
                // kill_on_drop(true) kills the child when the future is dropped
                Err(_) => return Err(RunError::Timeout { phase, after }),
            },
            None => child.wait_with_output().await,
        }
        .map_err(|source| RunError::Io { phase, source })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        tracing::debug!(%phase, bytes = combined.len(), status = ?output.status.code(), "phase exited");

        if !output.status.success() {
            return Err(RunError::NonZeroExit {
                phase,
                code: output.status.code(),
                output: combined,
            });
        }
        Ok((combined, output.status.code()))
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
