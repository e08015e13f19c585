// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation capture and recording for test diagnostics.
//!
//! Every `terraform`/`tofu` call made by the harness can be recorded here,
//! in memory and optionally as JSONL, so a failing run can be inspected
//! after the fact.

mod duration_serde;
mod log;
mod record;

pub use log::CaptureLog;
pub use record::{InvocationArgs, InvocationOutcome, InvocationRecord};
