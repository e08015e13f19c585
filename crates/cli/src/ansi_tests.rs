// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn strips_sgr_colors() {
    let input = "\x1b[1m\x1b[32m+\x1b[0m\x1b[0m resource \"aws_iam_role\" \"this\"";
    assert_eq!(strip_ansi(input), "+ resource \"aws_iam_role\" \"this\"");
}

#[test]
fn strips_bold_output_names() {
    let input = "  \x1b[1m+\x1b[0m\x1b[0m is_enabled = true";
    assert_eq!(strip_ansi(input), "  + is_enabled = true");
}

#[test]
fn strips_cursor_sequences() {
    assert_eq!(strip_ansi("\x1b[2Kdone\x1b[?25h"), "done");
}

#[test]
fn plain_text_unchanged() {
    let input = "Plan: 0 to add, 0 to change, 0 to destroy.";
    assert_eq!(strip_ansi(input), input);
    assert!(!has_ansi(input));
}

#[test]
fn detects_ansi() {
    assert!(has_ansi("\x1b[31mError\x1b[0m"));
}
