// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terraform/OpenTofu test harness for landing-zone modules.
//!
//! Build a [`TerraformOptions`](options::TerraformOptions) for an example or
//! a module target, run `init` then `plan` or `validate` through a
//! [`TerraformRunner`](runner::TerraformRunner), and check the captured text
//! with the [`assertions`] helpers:
//!
//! ```no_run
//! use lzharness::assertions::assert_matches;
//! use lzharness::layout::FixtureLayout;
//! use lzharness::options::setup_terraform_options;
//! use lzharness::runner::{Binary, TerraformRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = FixtureLayout::new("fixtures");
//! let options = setup_terraform_options("cicd-oidc/basic", [("is_enabled", true)])
//!     .upgrade(true)
//!     .build(&layout)?;
//! let runner = TerraformRunner::new(Binary::resolve(None, None)?);
//! runner.init(&options).await?;
//! let plan = runner.plan(&options).await?;
//! assert_matches(&plan.output, r"(?m)is_enabled\s*=\s*true")?;
//! # Ok(())
//! # }
//! ```
#![doc = include_str!("../README.md")]

pub mod ansi;
pub mod assertions;
/// Re-exported capture types from lzharness-capture crate.
pub mod capture {
    pub use lzharness_capture::{CaptureLog, InvocationArgs, InvocationOutcome, InvocationRecord};
}
pub mod config;
pub mod env;
pub mod layout;
pub mod logging;
pub mod options;
pub mod runner;
pub mod suite;

// Binary plumbing, hidden from docs
#[doc(hidden)]
pub mod app;
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod output_diagnostic;
