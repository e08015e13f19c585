// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative test suites.
//!
//! A suite is a TOML file of cases. Each case names a fixture, the
//! variables to pass, the phases to run and the expectations to check
//! against the last phase's output:
//!
//! ```toml
//! name = "cicd-oidc"
//!
//! [defaults]
//! upgrade = true
//!
//! [[case]]
//! name = "example-disabled"
//! example = "cicd-oidc/basic"
//! vars = { is_enabled = false }
//! expect = [
//!     { type = "matches", pattern = 'is_enabled\s*=\s*false' },
//!     { type = "not_contains", text = " to add" },
//! ]
//! ```

mod report;
mod runner;

pub use report::{CaseOutcome, CaseReport, SuiteReport};
pub use runner::{RunSettings, SuiteRunner};

use crate::assertions::Expectation;
use crate::layout::FixtureRef;
use crate::options::{is_valid_name, Vars};
use crate::runner::Phase;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("failed to read suite {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid suite {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("no suite files found in {0}")]
    Empty(PathBuf),

    #[error("suite {suite}: {message}")]
    Validation { suite: String, message: String },
}

/// A parsed suite file
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    /// Defaults to the file stem
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub defaults: CaseDefaults,

    #[serde(default, rename = "case")]
    pub cases: Vec<CaseSpec>,
}

/// Settings shared by every case in a suite
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseDefaults {
    #[serde(default)]
    pub upgrade: bool,

    #[serde(default)]
    pub no_color: bool,

    #[serde(default)]
    pub lock: bool,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Retry the built-in transient errors
    #[serde(default)]
    pub retry_default_errors: bool,
}

/// One case
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(default)]
    pub vars: Vars,

    /// Phases after `init`. Absent means `init` then `plan`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<Phase>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_color: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<bool>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_default_errors: Option<bool>,

    #[serde(default)]
    pub expect: Vec<Expectation>,
}

impl CaseSpec {
    /// Fixture this case runs against
    pub fn fixture(&self) -> Result<FixtureRef, String> {
        match (&self.example, &self.module, &self.target) {
            (Some(example), None, None) => Ok(FixtureRef::example(example)),
            (None, Some(module), Some(target)) => Ok(FixtureRef::target(module, target)),
            (None, Some(module), None) => Ok(FixtureRef::module(module)),
            (Some(_), Some(_), _) => Err("set either `example` or `module`, not both".into()),
            (Some(_), None, Some(_)) | (None, None, Some(_)) => {
                Err("`target` requires `module`".into())
            }
            (None, None, None) => Err("no fixture: set `example` or `module`".into()),
        }
    }

    /// Phases to run, always starting with `init`
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = self
            .phases
            .clone()
            .unwrap_or_else(|| vec![Phase::Init, Phase::Plan]);
        if phases.first() != Some(&Phase::Init) {
            phases.insert(0, Phase::Init);
        }
        phases
    }

    pub fn upgrade(&self, defaults: &CaseDefaults) -> bool {
        self.upgrade.unwrap_or(defaults.upgrade)
    }

    pub fn no_color(&self, defaults: &CaseDefaults) -> bool {
        self.no_color.unwrap_or(defaults.no_color)
    }

    pub fn lock(&self, defaults: &CaseDefaults) -> bool {
        self.lock.unwrap_or(defaults.lock)
    }

    pub fn retry_default_errors(&self, defaults: &CaseDefaults) -> bool {
        self.retry_default_errors
            .unwrap_or(defaults.retry_default_errors)
    }

    /// Suite env overlaid with the case's own
    pub fn env(&self, defaults: &CaseDefaults) -> BTreeMap<String, String> {
        let mut env = defaults.env.clone();
        env.extend(self.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        env
    }
}

impl Suite {
    /// Parse suite text. `name` is used when the text sets none.
    pub fn parse(text: &str, name: &str) -> Result<Self, SuiteError> {
        let mut suite: Suite = toml::from_str(text).map_err(|source| SuiteError::Toml {
            path: PathBuf::from(name),
            source,
        })?;
        if suite.name.is_empty() {
            suite.name = name.to_string();
        }
        suite.validate()?;
        Ok(suite)
    }

    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let text = std::fs::read_to_string(path).map_err(|source| SuiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&text, &stem).map_err(|e| match e {
            SuiteError::Toml { source, .. } => SuiteError::Toml {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Load suite files. Directories contribute their `*.toml` files in
    /// name order.
    pub fn load_all(paths: &[PathBuf]) -> Result<Vec<Self>, SuiteError> {
        let mut suites = Vec::new();
        for path in paths {
            if path.is_dir() {
                let pattern = path.join("*.toml");
                let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
                    .filter_map(Result::ok)
                    .collect();
                if files.is_empty() {
                    return Err(SuiteError::Empty(path.clone()));
                }
                files.sort();
                for file in files {
                    suites.push(Self::load(&file)?);
                }
            } else {
                suites.push(Self::load(path)?);
            }
        }
        Ok(suites)
    }

    /// Check fixtures, names, variables and patterns before anything runs
    pub fn validate(&self) -> Result<(), SuiteError> {
        let fail = |message: String| SuiteError::Validation {
            suite: self.name.clone(),
            message,
        };

        let mut seen = HashSet::new();
        for case in &self.cases {
            if case.name.trim().is_empty() {
                return Err(fail("case with empty name".into()));
            }
            if !seen.insert(case.name.as_str()) {
                return Err(fail(format!("duplicate case name {:?}", case.name)));
            }
            case.fixture()
                .map_err(|e| fail(format!("case {:?}: {e}", case.name)))?;
            if let Some(bad) = case.vars.keys().find(|k| !is_valid_name(k)) {
                return Err(fail(format!(
                    "case {:?}: invalid variable name {bad:?}",
                    case.name
                )));
            }
            if let Some(phases) = &case.phases {
                check_phases(phases).map_err(|e| fail(format!("case {:?}: {e}", case.name)))?;
            }
            for expectation in &case.expect {
                if let Expectation::Matches { pattern } | Expectation::NotMatches { pattern } =
                    expectation
                {
                    regex::Regex::new(pattern).map_err(|e| {
                        fail(format!("case {:?}: invalid pattern: {e}", case.name))
                    })?;
                }
            }
        }
        Ok(())
    }
}

/// `init` may only come first and no phase may repeat, so the last phase
/// is the one expectations are meant for.
fn check_phases(phases: &[Phase]) -> Result<(), String> {
    if phases.is_empty() {
        return Err("empty phase list".into());
    }
    if phases.iter().skip(1).any(|p| *p == Phase::Init) {
        return Err("`init` can only be the first phase".into());
    }
    let mut seen = HashSet::new();
    match phases.iter().find(|p| !seen.insert(**p)) {
        Some(repeated) => Err(format!("phase `{repeated}` listed twice")),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
