// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text assertions over captured tool output.
//!
//! Everything here matches against ANSI-stripped text, so the same checks
//! hold whether or not the tool ran with `-no-color`. Failures carry both
//! the expectation and the full output.

mod expectation;
mod plan;

pub use expectation::Expectation;
pub use plan::PlanSummary;

use crate::ansi::strip_ansi;
use regex::Regex;
use thiserror::Error;

/// A failed expectation with the output it was checked against
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{expectation}\n--- captured output ---\n{output}")]
pub struct AssertionFailure {
    pub expectation: String,
    pub output: String,
}

impl AssertionFailure {
    pub fn new(expectation: impl Into<String>, output: &str) -> Self {
        Self {
            expectation: expectation.into(),
            output: output.to_string(),
        }
    }
}

pub type AssertResult = Result<(), AssertionFailure>;

pub fn assert_contains(output: &str, needle: &str) -> AssertResult {
    let plain = strip_ansi(output);
    if plain.contains(needle) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            format!("expected output to contain {needle:?}"),
            &plain,
        ))
    }
}

pub fn assert_not_contains(output: &str, needle: &str) -> AssertResult {
    let plain = strip_ansi(output);
    if plain.contains(needle) {
        Err(AssertionFailure::new(
            format!("expected output not to contain {needle:?}"),
            &plain,
        ))
    } else {
        Ok(())
    }
}

pub fn assert_matches(output: &str, pattern: &str) -> AssertResult {
    let plain = strip_ansi(output);
    let re = compile(pattern, &plain)?;
    if re.is_match(&plain) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            format!("expected output to match /{pattern}/"),
            &plain,
        ))
    }
}

pub fn assert_not_matches(output: &str, pattern: &str) -> AssertResult {
    let plain = strip_ansi(output);
    let re = compile(pattern, &plain)?;
    match re.find(&plain) {
        Some(m) => Err(AssertionFailure::new(
            format!(
                "expected output not to match /{pattern}/ (matched {:?})",
                m.as_str()
            ),
            &plain,
        )),
        None => Ok(()),
    }
}

/// Pattern for an output rendered as `name = value`, tolerant of spacing
/// and of plan change markers (`+`, `~`, `-`). The value must end the line,
/// so for a changed output (`~ name = old -> new`) only `new` matches.
pub fn output_pattern(name: &str, value: &str) -> String {
    format!(
        r"(?m)(?:^|[^\w-]){}\s*=\s*(?:.*\s->\s*)?{}[ \t]*\r?$",
        regex::escape(name),
        regex::escape(value)
    )
}

/// Assert that output `name` is rendered with `value`
pub fn assert_output(output: &str, name: &str, value: &str) -> AssertResult {
    let plain = strip_ansi(output);
    let re = compile(&output_pattern(name, value), &plain)?;
    if re.is_match(&plain) {
        Ok(())
    } else {
        let found = output_value(&plain, name);
        Err(AssertionFailure::new(
            match found {
                Some(found) => format!("expected output {name} = {value}, found {name} = {found}"),
                None => format!("expected output {name} = {value}, but {name} is not rendered"),
            },
            &plain,
        ))
    }
}

/// Value rendered for output `name`, from the first `name = value` line.
/// For a changed output this is the new value.
pub fn output_value(output: &str, name: &str) -> Option<String> {
    let plain = strip_ansi(output);
    let pattern = format!(r"(?m)^\s*[+~-]?\s*{}\s*=\s*(.+?)\s*$", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let rendered = re.captures(&plain)?.get(1)?.as_str();
    let value = rendered.rsplit_once(" -> ").map_or(rendered, |(_, new)| new);
    Some(value.trim().to_string())
}

/// Assert the plan adds no resources
pub fn assert_no_additions(output: &str) -> AssertResult {
    let plain = strip_ansi(output);
    match PlanSummary::parse(&plain) {
        Some(summary) if summary.add == 0 => Ok(()),
        Some(summary) => Err(AssertionFailure::new(
            format!("expected no resource additions, plan adds {}", summary.add),
            &plain,
        )),
        None => Err(AssertionFailure::new(
            "expected a plan summary, found none",
            &plain,
        )),
    }
}

fn compile(pattern: &str, plain: &str) -> Result<Regex, AssertionFailure> {
    Regex::new(pattern)
        .map_err(|e| AssertionFailure::new(format!("invalid pattern /{pattern}/: {e}"), plain))
}

#[cfg(test)]
#[path = "assertions_tests.rs"]
mod tests;
