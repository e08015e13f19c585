// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the terraform/tofu binary.

use super::RunError;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Names searched on `PATH`, in order
pub const SEARCH_ORDER: &[&str] = &["tofu", "terraform"];

/// Which CLI a binary is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolFlavor {
    Terraform,
    OpenTofu,
}

impl fmt::Display for ToolFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolFlavor::Terraform => f.write_str("terraform"),
            ToolFlavor::OpenTofu => f.write_str("tofu"),
        }
    }
}

/// A resolved tool binary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
    path: PathBuf,
    flavor: ToolFlavor,
}

impl Binary {
    /// Wrap a path as-is. Flavor comes from the file name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let flavor = match path.file_stem().and_then(OsStr::to_str) {
            Some(stem) if stem.starts_with("tofu") => ToolFlavor::OpenTofu,
            _ => ToolFlavor::Terraform,
        };
        Self { path, flavor }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn flavor(&self) -> ToolFlavor {
        self.flavor
    }

    /// Resolve the binary to run.
    ///
    /// Order: `explicit`, then `LZHARNESS_BINARY`, then `configured`, then
    /// the first of [`SEARCH_ORDER`] on `PATH`. Bare names are looked up on
    /// `PATH`; anything with a path separator must exist.
    pub fn resolve(explicit: Option<&Path>, configured: Option<&Path>) -> Result<Self, RunError> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(crate::env::binary)
            .or_else(|| configured.map(Path::to_path_buf));

        match requested {
            Some(requested) => Self::locate(&requested),
            None => SEARCH_ORDER
                .iter()
                .find_map(|name| find_on_path(OsStr::new(name)))
                .map(Self::new)
                .ok_or(RunError::BinaryNotFound),
        }
    }

    fn locate(requested: &Path) -> Result<Self, RunError> {
        if requested.components().count() > 1 || requested.is_absolute() {
            if requested.is_file() {
                return Ok(Self::new(requested));
            }
            return Err(RunError::MissingBinary(requested.to_path_buf()));
        }
        find_on_path(requested.as_os_str())
            .map(Self::new)
            .ok_or_else(|| RunError::MissingBinary(requested.to_path_buf()))
    }
}

fn find_on_path(name: &OsStr) -> Option<PathBuf> {
    let path = crate::env::path()?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "binary_tests.rs"]
mod tests;
