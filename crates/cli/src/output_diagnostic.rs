// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error and warning lines on stderr for the binary.
//!
//! Colored when stderr is a terminal and `NO_COLOR` is unset.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// SGR color code
    fn color(self) -> u8 {
        match self {
            Severity::Error => 31,
            Severity::Warning => 33,
        }
    }
}

pub fn print_error(msg: impl Display) {
    print_diagnostic(Severity::Error, msg);
}

pub fn print_warning(msg: impl Display) {
    print_diagnostic(Severity::Warning, msg);
}

fn print_diagnostic(severity: Severity, msg: impl Display) {
    let stderr = io::stderr();
    let color = stderr.is_terminal() && !crate::env::no_color();
    write_diagnostic(&mut stderr.lock(), severity, msg, color);
}

/// `lzharness: error: msg`. Multi-line messages (tool output) keep their
/// lines; only the first line is colored.
fn write_diagnostic<W: Write>(writer: &mut W, severity: Severity, msg: impl Display, color: bool) {
    let text = msg.to_string();
    let (first, rest) = text.split_once('\n').unwrap_or((text.as_str(), ""));
    let _ = if color {
        writeln!(
            writer,
            "lzharness: \x1b[{}m{}: {first}\x1b[0m",
            severity.color(),
            severity.label()
        )
    } else {
        writeln!(writer, "lzharness: {}: {first}", severity.label())
    };
    if !rest.is_empty() {
        let _ = writeln!(writer, "{}", rest.trim_end_matches('\n'));
    }
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
