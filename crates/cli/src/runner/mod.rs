// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation runner: `init`, `plan`, and `validate` as child processes.
//!
//! Each phase blocks its task until the tool exits and hands back the
//! captured output. Failures are returned, never swallowed.

mod binary;
mod error;
mod executor;
mod phase;

pub use binary::{Binary, ToolFlavor, SEARCH_ORDER};
pub use error::RunError;
pub use executor::{Invocation, TerraformRunner};
pub use phase::Phase;
