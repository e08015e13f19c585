// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-configuration sandbox directories.
//!
//! Each built configuration owns a fresh temp dir holding its provider
//! plugin cache, its tool data dir, and (with fixture copying) a private
//! copy of the fixture tree. The directory is removed on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SANDBOX_PREFIX: &str = "lzharness-";

/// Entries never copied into a sandbox: tool state, lock files, VCS and
/// cargo build output
const SKIPPED_DIRS: &[&str] = &[".terraform", ".git", "target"];
const SKIPPED_FILES: &[&str] = &[".terraform.lock.hcl", ".terraform.tfstate.lock.info"];
const SKIPPED_SUFFIXES: &[&str] = &[".tfstate", ".tfstate.backup", ".tfplan"];

/// How a configuration is isolated from concurrent tests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Isolation {
    /// Copy the fixture root into the sandbox and run there
    #[default]
    CopyFixtures,
    /// Run in the original fixture dir; isolate only cache and data dir
    CacheOnly,
}

#[derive(Debug)]
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    /// Create a sandbox with its cache and data directories in place
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(SANDBOX_PREFIX).tempdir()?;
        let sandbox = Self { dir };
        fs::create_dir_all(sandbox.plugin_cache_dir())?;
        fs::create_dir_all(sandbox.data_dir())?;
        Ok(sandbox)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Value for `TF_PLUGIN_CACHE_DIR`
    pub fn plugin_cache_dir(&self) -> PathBuf {
        self.dir.path().join("plugin-cache")
    }

    /// Value for `TF_DATA_DIR`
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("tf-data")
    }

    /// Where the fixture tree is copied
    pub fn fixtures_dir(&self) -> PathBuf {
        self.dir.path().join("fixtures")
    }
}

/// Recursively copy `src` into `dst`, skipping tool state. Returns the
/// number of files copied.
///
/// `dst` may live inside `src` (a temp dir under the fixture root): the
/// directories leading to it are not descended into.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<u64> {
    fs::create_dir_all(dst)?;
    let dst_real = fs::canonicalize(dst)?;
    copy_dir(src, dst, &dst_real)
}

fn copy_dir(src: &Path, dst: &Path, dst_real: &Path) -> io::Result<u64> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        let from = entry.path();

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if SKIPPED_DIRS.contains(&name_str.as_ref()) {
                continue;
            }
            if dst_real.starts_with(fs::canonicalize(&from)?) {
                tracing::debug!(path = %from.display(), "skipping directory holding the sandbox");
                continue;
            }
            copied += copy_dir(&from, &dst.join(&name), dst_real)?;
        } else if SKIPPED_FILES.contains(&name_str.as_ref())
            || SKIPPED_SUFFIXES.iter().any(|s| name_str.ends_with(s))
        {
            continue;
        } else if file_type.is_symlink() && fs::metadata(&from)?.is_dir() {
            tracing::debug!(path = %from.display(), "skipping symlinked directory");
        } else {
            fs::copy(&from, dst.join(&name))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
