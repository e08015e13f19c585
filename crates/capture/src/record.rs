// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded invocation types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Arguments of a single tool invocation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationArgs {
    /// Tool phase (`init`, `plan`, `validate`)
    pub phase: String,
    /// Binary that was executed
    pub binary: PathBuf,
    /// Working directory of the child process
    pub working_dir: PathBuf,
    /// Full argument list, phase verb included
    pub args: Vec<String>,
    /// Attempt number, starting at 1
    pub attempt: u32,
}

/// How an invocation ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// Exit status zero
    Success { output_bytes: usize },
    /// Non-zero exit, spawn failure, or timeout
    Failure {
        exit_code: Option<i32>,
        message: String,
    },
}

impl InvocationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, InvocationOutcome::Failure { .. })
    }
}

/// A single recorded invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Sequence number within the log
    pub seq: u64,
    /// Wall-clock time the record was written
    pub timestamp: SystemTime,
    /// Time since the log was created
    #[serde(with = "crate::duration_serde")]
    pub elapsed: Duration,
    pub args: InvocationArgs,
    pub outcome: InvocationOutcome,
}
