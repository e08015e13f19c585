// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for integration tests.

#![allow(dead_code)]

use lzharness::assertions::AssertionFailure;
use lzharness::layout::FixtureLayout;
use lzharness::runner::{Binary, TerraformRunner};
use std::fs;
use std::path::{Path, PathBuf};

/// Repository root (two levels above this crate)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap()
}

/// Layout over the checked-in HCL fixtures
pub fn fixtures_layout() -> FixtureLayout {
    FixtureLayout::new(workspace_root().join("fixtures"))
}

pub fn suites_dir() -> PathBuf {
    workspace_root().join("suites")
}

/// Runner for the real tool, resolved the same way the binary does
pub fn real_runner() -> TerraformRunner {
    lzharness::logging::init_for_tests();
    let binary = Binary::resolve(None, None).expect("terraform or tofu must be installed");
    TerraformRunner::new(binary)
}

/// Panic with the expectation and captured output on failure
#[track_caller]
pub fn require(result: Result<(), AssertionFailure>, context: &str) {
    if let Err(failure) = result {
        panic!("{context}: {failure}");
    }
}

/// Executable `terraform` stub in `dir` running `body` under /bin/sh
pub fn stub_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("terraform");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// Stub that answers like the tool for the disabled fixtures
pub const DISABLED_PLAN_STUB: &str = r#"case "$1" in
  init) echo "Terraform has been successfully initialized!" ;;
  validate) echo "Success! The configuration is valid." ;;
  plan)
    printf '\nChanges to Outputs:\n  + is_enabled = false\n\n'
    echo "You can apply this plan to save these new output values to the Terraform"
    echo "state, without changing any real infrastructure."
    ;;
esac"#;
