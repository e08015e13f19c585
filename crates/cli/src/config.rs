// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration (`lzharness.toml`).
//!
//! ```toml
//! [tool]
//! binary = "tofu"
//! timeout_secs = 600
//!
//! [layout]
//! root = "fixtures"
//!
//! [env]
//! AWS_REGION = "us-east-1"
//!
//! [retry]
//! max_retries = 3
//! time_between_secs = 5
//! use_defaults = true
//! ```

use crate::layout::{DEFAULT_EXAMPLES_DIR, DEFAULT_MODULES_DIR, DEFAULT_TARGETS_DIR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up next to the fixture root
pub const CONFIG_FILE_NAME: &str = "lzharness.toml";

fn default_modules_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MODULES_DIR)
}

fn default_examples_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXAMPLES_DIR)
}

fn default_targets_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TARGETS_DIR)
}

fn default_max_retries() -> u32 {
    3
}

fn default_time_between_secs() -> u64 {
    5
}

/// Top-level harness configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    /// Extra environment passed to every tool invocation
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Retry policy applied to every case. Absent means no retries.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

/// `[tool]` section
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Binary name or path (`terraform`, `tofu`, `/opt/bin/tofu`)
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Per-invocation timeout. Absent means wait for exit.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// `[layout]` section
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Fixture root, relative to the config file's directory
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,

    #[serde(default = "default_examples_dir")]
    pub examples_dir: PathBuf,

    #[serde(default = "default_targets_dir")]
    pub targets_dir: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: None,
            modules_dir: default_modules_dir(),
            examples_dir: default_examples_dir(),
            targets_dir: default_targets_dir(),
        }
    }
}

/// `[retry]` section
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_time_between_secs")]
    pub time_between_secs: u64,

    /// Include the built-in transient error patterns
    #[serde(default)]
    pub use_defaults: bool,

    /// Extra retryable patterns: regex -> description
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            time_between_secs: default_time_between_secs(),
            use_defaults: false,
            errors: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl HarnessConfig {
    /// Parse config text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Find and load the config.
    ///
    /// Order: `explicit` path, then `LZHARNESS_CONFIG`, then
    /// `lzharness.toml` in `search_dir`. Returns the default config and no
    /// path when none exists. An explicitly named file must exist.
    pub fn discover(
        explicit: Option<&Path>,
        search_dir: &Path,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit
            .map(Path::to_path_buf)
            .or_else(crate::env::config_path)
        {
            let config = Self::load(&path)?;
            return Ok((config, Some(path)));
        }

        let candidate = search_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            let config = Self::load(&candidate)?;
            return Ok((config, Some(candidate)));
        }

        Ok((Self::default(), None))
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.tool.timeout_secs.map(std::time::Duration::from_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
