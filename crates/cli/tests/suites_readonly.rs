// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg(feature = "readonly")]

//! Checked-in suites against the real tool.

mod common;

use common::{fixtures_layout, real_runner, suites_dir};
use lzharness::suite::{RunSettings, Suite, SuiteRunner};

#[tokio::test]
async fn checked_in_suites_pass() {
    let suites = Suite::load_all(&[suites_dir()]).unwrap();
    let runner = SuiteRunner::new(real_runner(), fixtures_layout(), RunSettings::default());

    let report = runner.run(&suites).await;
    assert!(report.all_passed(), "{}", report.render_text());
}
