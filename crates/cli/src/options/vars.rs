// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input variable rendering for `-var` flags.
//!
//! Top-level strings are passed raw; everything else is rendered as an HCL
//! expression, which is what the tool parses for non-string variable types.

use serde_json::Value;
use std::collections::BTreeMap;

/// Input variables keyed by name. Ordered so rendered flags are stable.
pub type Vars = BTreeMap<String, Value>;

/// Render `-var` flag pairs, one per variable, in key order.
pub fn var_args(vars: &Vars) -> Vec<String> {
    let mut args = Vec::with_capacity(vars.len() * 2);
    for (name, value) in vars {
        args.push("-var".to_string());
        args.push(format!("{}={}", name, render_value(value)));
    }
    args
}

/// Render a variable's value as it appears after `name=`.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_hcl(other),
    }
}

/// Render a value as an HCL expression.
pub fn render_hcl(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(render_hcl).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} = {}", quote(k), render_hcl(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Quote a string literal, escaping template sequences so nested values
/// are never interpolated.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `name` is a valid HCL variable identifier.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
#[path = "vars_tests.rs"]
mod tests;
