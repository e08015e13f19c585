// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI escape stripping for tool output.
//!
//! terraform and tofu colorize plan output unless `-no-color` is passed.
//! Assertions run on stripped text so they hold either way.

use regex::Regex;
use std::sync::LazyLock;

/// Matches CSI sequences: ESC [ params final-byte. Covers SGR colors (`m`)
/// and the occasional cursor control some terminals inject.
static ANSI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // SAFETY: This regex pattern is a compile-time constant and is guaranteed to be valid
    #[allow(clippy::expect_used)]
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI regex pattern is invalid")
});

/// Strip all ANSI CSI sequences, returning plain text.
pub fn strip_ansi(input: &str) -> String {
    ANSI_REGEX.replace_all(input, "").to_string()
}

/// Whether the input contains any ANSI sequence.
pub fn has_ansi(input: &str) -> bool {
    ANSI_REGEX.is_match(input)
}

#[cfg(test)]
#[path = "ansi_tests.rs"]
mod tests;
