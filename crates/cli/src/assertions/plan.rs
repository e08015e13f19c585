// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plan summary line parsing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SUMMARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: This regex pattern is a compile-time constant and is guaranteed to be valid
    #[allow(clippy::expect_used)]
    Regex::new(
        r"Plan: (?:(\d+) to import, )?(\d+) to add, (\d+) to change, (\d+) to destroy",
    )
    .expect("plan summary regex is invalid")
});

/// Resource counts from a plan
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub import: u32,
    pub add: u32,
    pub change: u32,
    pub destroy: u32,
}

impl PlanSummary {
    /// Parse plan text (already ANSI-stripped).
    ///
    /// `Plan: ...` gives the counts. `No changes.` and an outputs-only plan
    /// (`Changes to Outputs:` with no `Plan:` line) both mean zero resource
    /// changes. Anything else is not a plan.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(caps) = SUMMARY_REGEX.captures(text) {
            let count = |i: usize| {
                caps.get(i)
                    .and_then(|m| m.as_str().parse().ok())
                    .unwrap_or(0)
            };
            return Some(Self {
                import: count(1),
                add: count(2),
                change: count(3),
                destroy: count(4),
            });
        }
        if text.contains("No changes.") || text.contains("Changes to Outputs:") {
            return Some(Self::default());
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
