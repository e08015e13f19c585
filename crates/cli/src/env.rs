// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All environment variables read by lzharness or handed to the tool are
//! named here. Use these accessors instead of calling `std::env::var()`
//! directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `LZHARNESS_BINARY`: Path or name of the terraform/tofu binary.
pub fn binary() -> Option<PathBuf> {
    non_empty(names::LZHARNESS_BINARY).map(PathBuf::from)
}

/// `LZHARNESS_ROOT`: Fixture root override.
pub fn root() -> Option<PathBuf> {
    non_empty(names::LZHARNESS_ROOT).map(PathBuf::from)
}

/// `LZHARNESS_CONFIG`: Harness config file path.
pub fn config_path() -> Option<PathBuf> {
    non_empty(names::LZHARNESS_CONFIG).map(PathBuf::from)
}

/// `LZHARNESS_LOG`: Log filter directives (`tracing_subscriber::EnvFilter` syntax).
pub fn log_filter() -> Option<String> {
    non_empty(names::LZHARNESS_LOG)
}

/// `PATH`: Search path used to locate the tool binary.
pub fn path() -> Option<std::ffi::OsString> {
    std::env::var_os(names::PATH)
}

/// `NO_COLOR`: Disables colored diagnostics when set to anything non-empty.
pub fn no_color() -> bool {
    non_empty(names::NO_COLOR).is_some()
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
