// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Execution configuration for a single test.
//!
//! A [`TerraformOptions`] is built once per test from a fixture reference
//! and a variable mapping, and is not modified afterwards. Every build gets
//! its own [`Sandbox`], so tests running in parallel never share a provider
//! cache, a data dir, or (with [`Isolation::CopyFixtures`]) a working
//! directory.

mod retry;
mod sandbox;
mod vars;

pub use retry::{RetryPolicy, RetryableError, DEFAULT_RETRYABLE_ERRORS};
pub use sandbox::{copy_tree, Isolation, Sandbox};
pub use vars::{is_valid_name, render_hcl, render_value, var_args, Vars};

use crate::env;
use crate::layout::{FixtureLayout, FixtureRef, LayoutError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid variable name {0:?}")]
    InvalidVariableName(String),

    #[error("failed to prepare sandbox: {0}")]
    Sandbox(#[source] std::io::Error),
}

/// Immutable execution configuration for one test
#[derive(Clone, Debug)]
pub struct TerraformOptions {
    fixture: FixtureRef,
    working_dir: PathBuf,
    vars: Vars,
    env_vars: BTreeMap<String, String>,
    upgrade: bool,
    no_color: bool,
    lock: bool,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    /// Keeps the sandbox alive for as long as any clone exists
    sandbox: Option<Arc<Sandbox>>,
}

impl TerraformOptions {
    pub fn fixture(&self) -> &FixtureRef {
        &self.fixture
    }

    /// Directory the tool runs in
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// Environment passed to the tool on top of the inherited one
    pub fn env_vars(&self) -> &BTreeMap<String, String> {
        &self.env_vars
    }

    pub fn upgrade(&self) -> bool {
        self.upgrade
    }

    pub fn no_color(&self) -> bool {
        self.no_color
    }

    pub fn lock(&self) -> bool {
        self.lock
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn sandbox_dir(&self) -> Option<&Path> {
        self.sandbox.as_deref().map(Sandbox::path)
    }

    /// `-var name=value` pairs, one per variable
    pub fn var_args(&self) -> Vec<String> {
        vars::var_args(&self.vars)
    }

    /// Copy of these options that retries the built-in transient errors
    pub fn with_default_retryable_errors(&self) -> Self {
        Self {
            retry: RetryPolicy::default_retryable(),
            ..self.clone()
        }
    }

    /// Minimal configuration for a standalone `init` of the same directory:
    /// same working dir and environment, no variables, no color, no lock,
    /// default retryable errors.
    pub fn init_only(&self) -> Self {
        Self {
            vars: Vars::new(),
            upgrade: false,
            no_color: true,
            lock: false,
            retry: RetryPolicy::default_retryable(),
            ..self.clone()
        }
    }
}

/// Builds [`TerraformOptions`]
#[derive(Clone, Debug)]
pub struct OptionsBuilder {
    fixture: FixtureRef,
    vars: Vars,
    env_vars: BTreeMap<String, String>,
    upgrade: bool,
    no_color: bool,
    lock: bool,
    retry: RetryPolicy,
    timeout: Option<Duration>,
    isolation: Isolation,
}

impl OptionsBuilder {
    pub fn new(fixture: FixtureRef) -> Self {
        Self {
            fixture,
            vars: Vars::new(),
            env_vars: BTreeMap::new(),
            upgrade: false,
            no_color: false,
            lock: false,
            retry: RetryPolicy::none(),
            timeout: None,
            isolation: Isolation::default(),
        }
    }

    /// Set one variable. A later value for the same name replaces the earlier one.
    pub fn var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in vars {
            self.vars.insert(name.into(), value.into());
        }
        self
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(name.into(), value.into());
        self
    }

    pub fn envs<K, V>(mut self, envs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in envs {
            self.env_vars.insert(name.into(), value.into());
        }
        self
    }

    pub fn upgrade(mut self, upgrade: bool) -> Self {
        self.upgrade = upgrade;
        self
    }

    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn isolation(mut self, isolation: Isolation) -> Self {
        self.isolation = isolation;
        self
    }

    /// Resolve the fixture and create the sandbox.
    ///
    /// Fails if the fixture directory does not exist, a variable name is
    /// not a valid identifier, or the sandbox cannot be prepared.
    pub fn build(self, layout: &FixtureLayout) -> Result<TerraformOptions, SetupError> {
        let fixture_dir = layout.resolve(&self.fixture)?;

        if let Some(bad) = self.vars.keys().find(|name| !is_valid_name(name)) {
            return Err(SetupError::InvalidVariableName(bad.clone()));
        }

        let sandbox = Sandbox::create().map_err(SetupError::Sandbox)?;

        let working_dir = match self.isolation {
            Isolation::CopyFixtures => {
                let copy_root = sandbox.fixtures_dir();
                let files = copy_tree(layout.root(), &copy_root).map_err(SetupError::Sandbox)?;
                tracing::debug!(
                    fixture = %self.fixture,
                    files,
                    sandbox = %sandbox.path().display(),
                    "copied fixture tree"
                );
                layout.rebased(copy_root).resolve(&self.fixture)?
            }
            Isolation::CacheOnly => fixture_dir,
        };

        // Isolation entries are applied last so user env cannot undo them.
        let mut env_vars = self.env_vars;
        env_vars.insert(env::TF_IN_AUTOMATION.to_string(), "1".to_string());
        env_vars.insert(
            env::TF_PLUGIN_CACHE_DIR.to_string(),
            sandbox.plugin_cache_dir().to_string_lossy().into_owned(),
        );
        env_vars.insert(
            env::TF_DATA_DIR.to_string(),
            sandbox.data_dir().to_string_lossy().into_owned(),
        );

        Ok(TerraformOptions {
            fixture: self.fixture,
            working_dir,
            vars: self.vars,
            env_vars,
            upgrade: self.upgrade,
            no_color: self.no_color,
            lock: self.lock,
            retry: self.retry,
            timeout: self.timeout,
            sandbox: Some(Arc::new(sandbox)),
        })
    }
}

/// Builder for an example root configuration, e.g. `cicd-oidc/basic`.
pub fn setup_terraform_options<K, V>(
    example: &str,
    vars: impl IntoIterator<Item = (K, V)>,
) -> OptionsBuilder
where
    K: Into<String>,
    V: Into<Value>,
{
    OptionsBuilder::new(FixtureRef::example(example)).vars(vars)
}

/// Builder for a module's named target configuration.
pub fn setup_target_terraform_options<K, V>(
    module: &str,
    target: &str,
    vars: impl IntoIterator<Item = (K, V)>,
) -> OptionsBuilder
where
    K: Into<String>,
    V: Into<Value>,
{
    OptionsBuilder::new(FixtureRef::target(module, target)).vars(vars)
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
