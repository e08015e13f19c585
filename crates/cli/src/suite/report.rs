// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Case and suite results.

use crate::layout::FixtureRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    /// A phase failed or an expectation did not hold
    Failed { reason: String },
    /// Fixture resolution or sandbox creation failed; nothing ran
    SetupFailed { reason: String },
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }

    fn label(&self) -> &'static str {
        match self {
            CaseOutcome::Passed => "ok",
            CaseOutcome::Failed { .. } => "FAILED",
            CaseOutcome::SetupFailed { .. } => "SETUP FAILED",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub suite: String,
    pub case: String,
    /// Absent when the case names no usable fixture
    pub fixture: Option<FixtureRef>,
    pub outcome: CaseOutcome,
    pub elapsed_ms: u64,
}

impl CaseReport {
    /// `suite/case`
    pub fn id(&self) -> String {
        format!("{}/{}", self.suite, self.case)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Human-readable summary in `cargo test` style
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "running {} cases", self.cases.len());
        for case in &self.cases {
            let _ = writeln!(
                out,
                "case {} ... {} ({} ms)",
                case.id(),
                case.outcome.label(),
                case.elapsed_ms
            );
        }

        let failures: Vec<_> = self
            .cases
            .iter()
            .filter_map(|c| match &c.outcome {
                CaseOutcome::Passed => None,
                CaseOutcome::Failed { reason } | CaseOutcome::SetupFailed { reason } => {
                    Some((c, reason))
                }
            })
            .collect();
        if !failures.is_empty() {
            let _ = writeln!(out, "\nfailures:");
            for (case, reason) in &failures {
                match &case.fixture {
                    Some(fixture) => {
                        let _ = writeln!(out, "\n---- {} ({fixture}) ----\n{reason}", case.id());
                    }
                    None => {
                        let _ = writeln!(out, "\n---- {} ----\n{reason}", case.id());
                    }
                }
            }
        }

        let _ = writeln!(
            out,
            "\nresult: {}. {} passed; {} failed; finished in {:.2}s",
            if self.all_passed() { "ok" } else { "FAILED" },
            self.passed(),
            self.failed(),
            self.elapsed_ms as f64 / 1000.0
        );
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
