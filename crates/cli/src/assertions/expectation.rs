// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative expectations, as written in suite files.

use super::{
    assert_contains, assert_matches, assert_no_additions, assert_not_contains,
    assert_not_matches, assert_output, AssertResult, AssertionFailure, PlanSummary,
};
use crate::ansi::strip_ansi;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One check against a phase's output
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    Contains {
        text: String,
    },
    NotContains {
        text: String,
    },
    Matches {
        pattern: String,
    },
    NotMatches {
        pattern: String,
    },
    /// Output rendered as `name = value`
    Output {
        name: String,
        value: String,
    },
    /// `No changes.` or an outputs-only plan
    NoChanges,
    /// Plan adds no resources
    NoAdditions,
    /// Exact counts; absent fields are not checked
    PlanSummary {
        #[serde(default)]
        add: Option<u32>,
        #[serde(default)]
        change: Option<u32>,
        #[serde(default)]
        destroy: Option<u32>,
    },
}

impl Expectation {
    pub fn check(&self, output: &str) -> AssertResult {
        match self {
            Expectation::Contains { text } => assert_contains(output, text),
            Expectation::NotContains { text } => assert_not_contains(output, text),
            Expectation::Matches { pattern } => assert_matches(output, pattern),
            Expectation::NotMatches { pattern } => assert_not_matches(output, pattern),
            Expectation::Output { name, value } => assert_output(output, name, value),
            Expectation::NoAdditions => assert_no_additions(output),
            Expectation::NoChanges => {
                let plain = strip_ansi(output);
                match PlanSummary::parse(&plain) {
                    Some(summary) if summary.is_empty() => Ok(()),
                    _ => Err(AssertionFailure::new(self.to_string(), &plain)),
                }
            }
            Expectation::PlanSummary {
                add,
                change,
                destroy,
            } => {
                let plain = strip_ansi(output);
                let Some(summary) = PlanSummary::parse(&plain) else {
                    return Err(AssertionFailure::new(
                        format!("{self}, found no plan summary"),
                        &plain,
                    ));
                };
                let matches = add.map_or(true, |n| n == summary.add)
                    && change.map_or(true, |n| n == summary.change)
                    && destroy.map_or(true, |n| n == summary.destroy);
                if matches {
                    Ok(())
                } else {
                    Err(AssertionFailure::new(
                        format!(
                            "{self}, found {} to add, {} to change, {} to destroy",
                            summary.add, summary.change, summary.destroy
                        ),
                        &plain,
                    ))
                }
            }
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Contains { text } => write!(f, "expected output to contain {text:?}"),
            Expectation::NotContains { text } => {
                write!(f, "expected output not to contain {text:?}")
            }
            Expectation::Matches { pattern } => write!(f, "expected output to match /{pattern}/"),
            Expectation::NotMatches { pattern } => {
                write!(f, "expected output not to match /{pattern}/")
            }
            Expectation::Output { name, value } => write!(f, "expected output {name} = {value}"),
            Expectation::NoChanges => f.write_str("expected no resource changes"),
            Expectation::NoAdditions => f.write_str("expected no resource additions"),
            Expectation::PlanSummary {
                add,
                change,
                destroy,
            } => {
                let show = |n: &Option<u32>| n.map_or_else(|| "any".to_string(), |n| n.to_string());
                write!(
                    f,
                    "expected plan with {} to add, {} to change, {} to destroy",
                    show(add),
                    show(change),
                    show(destroy)
                )
            }
        }
    }
}
