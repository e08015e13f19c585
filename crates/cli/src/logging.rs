// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup for the binary.
//!
//! Library code only emits events; installing a subscriber is left to the
//! binary and to tests. Logs go to stderr so stdout stays free for reports.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Filter from `LZHARNESS_LOG`, else `warn` (`debug` when verbose)
pub fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    match crate::env::log_filter() {
        Some(directives) => EnvFilter::builder()
            .with_default_directive(default.into())
            .parse_lossy(directives),
        None => EnvFilter::default().add_directive(default.into()),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbose: bool, format: LogFormat) -> Result<(), TryInitError> {
    let layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter(verbose))
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .with_target(true)
            .with_filter(filter(verbose))
            .boxed(),
    };
    tracing_subscriber::registry().with(layer).try_init()
}

/// Test-writer subscriber so tool invocations show up under `--nocapture`.
/// Safe to call from every test.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter(true))
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
