// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture path resolution.
//!
//! The fixture tree is opaque HCL. The harness only needs to know where a
//! module, an example, or a module's named target lives:
//!
//! ```text
//! <root>/modules/<module>
//! <root>/examples/<example path>
//! <root>/targets/<module>/<target>
//! ```

use crate::config::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODULES_DIR: &str = "modules";
pub const DEFAULT_EXAMPLES_DIR: &str = "examples";
pub const DEFAULT_TARGETS_DIR: &str = "targets";

/// Reference to a fixture directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureRef {
    /// A module's named target configuration
    Target { module: String, target: String },
    /// An example root configuration, e.g. `cicd-oidc/basic`
    Example { example: String },
    /// The module itself
    Module { module: String },
}

impl FixtureRef {
    pub fn example(path: impl Into<String>) -> Self {
        FixtureRef::Example {
            example: path.into(),
        }
    }

    pub fn target(module: impl Into<String>, target: impl Into<String>) -> Self {
        FixtureRef::Target {
            module: module.into(),
            target: target.into(),
        }
    }

    pub fn module(name: impl Into<String>) -> Self {
        FixtureRef::Module {
            module: name.into(),
        }
    }
}

impl fmt::Display for FixtureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureRef::Target { module, target } => write!(f, "{module} (target {target})"),
            FixtureRef::Example { example } => write!(f, "example {example}"),
            FixtureRef::Module { module } => write!(f, "module {module}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid fixture identifier {0:?}: must be a non-empty relative path without '..'")]
    InvalidIdentifier(String),

    #[error("fixture directory not found for {fixture}: {path}")]
    NotFound { fixture: String, path: PathBuf },
}

/// Maps fixture references to on-disk directories
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureLayout {
    root: PathBuf,
    modules_dir: PathBuf,
    examples_dir: PathBuf,
    targets_dir: PathBuf,
}

impl FixtureLayout {
    /// Layout with the default directory names under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            modules_dir: PathBuf::from(DEFAULT_MODULES_DIR),
            examples_dir: PathBuf::from(DEFAULT_EXAMPLES_DIR),
            targets_dir: PathBuf::from(DEFAULT_TARGETS_DIR),
        }
    }

    /// Layout from the `[layout]` config section. A relative `root` is
    /// taken relative to `base`.
    pub fn from_config(config: &LayoutConfig, base: &Path) -> Self {
        let root = match &config.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => base.join(root),
            None => base.to_path_buf(),
        };
        Self {
            root,
            modules_dir: config.modules_dir.clone(),
            examples_dir: config.examples_dir.clone(),
            targets_dir: config.targets_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Same layout rooted somewhere else (used for sandbox copies)
    pub fn rebased(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self.clone()
        }
    }

    pub fn module_path(&self, name: &str) -> Result<PathBuf, LayoutError> {
        Ok(self
            .root
            .join(&self.modules_dir)
            .join(checked_identifier(name)?))
    }

    pub fn example_path(&self, path: &str) -> Result<PathBuf, LayoutError> {
        Ok(self
            .root
            .join(&self.examples_dir)
            .join(checked_identifier(path)?))
    }

    pub fn target_path(&self, module: &str, target: &str) -> Result<PathBuf, LayoutError> {
        Ok(self
            .root
            .join(&self.targets_dir)
            .join(checked_identifier(module)?)
            .join(checked_identifier(target)?))
    }

    /// Path for a reference, without checking it exists
    pub fn path_for(&self, fixture: &FixtureRef) -> Result<PathBuf, LayoutError> {
        match fixture {
            FixtureRef::Target { module, target } => self.target_path(module, target),
            FixtureRef::Example { example } => self.example_path(example),
            FixtureRef::Module { module } => self.module_path(module),
        }
    }

    /// Resolve a reference to an existing directory
    pub fn resolve(&self, fixture: &FixtureRef) -> Result<PathBuf, LayoutError> {
        let path = self.path_for(fixture)?;
        if !path.is_dir() {
            return Err(LayoutError::NotFound {
                fixture: fixture.to_string(),
                path,
            });
        }
        Ok(path)
    }

    /// Shorthand for `resolve(&FixtureRef::module(name))`
    pub fn module_dir(&self, name: &str) -> Result<PathBuf, LayoutError> {
        self.resolve(&FixtureRef::module(name))
    }

    pub fn example_dir(&self, path: &str) -> Result<PathBuf, LayoutError> {
        self.resolve(&FixtureRef::example(path))
    }

    pub fn target_dir(&self, module: &str, target: &str) -> Result<PathBuf, LayoutError> {
        self.resolve(&FixtureRef::target(module, target))
    }
}

/// Reject identifiers that would escape the layout root.
fn checked_identifier(id: &str) -> Result<&Path, LayoutError> {
    let path = Path::new(id);
    let valid = !id.trim().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if valid {
        Ok(path)
    } else {
        Err(LayoutError::InvalidIdentifier(id.to_string()))
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
