// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tool phases and their command lines.

use crate::options::TerraformOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tool verb run by the harness
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Init,
    Plan,
    Validate,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Plan => "plan",
            Phase::Validate => "validate",
        }
    }

    /// Full argument list for this phase, verb first.
    ///
    /// - `init -upgrade=<bool> -input=false -lock=<bool> [-no-color]`
    /// - `plan -input=false -lock=<bool> [-no-color] -var k=v ...`
    /// - `validate [-no-color]`
    pub fn args(&self, options: &TerraformOptions) -> Vec<String> {
        let mut args = vec![self.as_str().to_string()];
        match self {
            Phase::Init => {
                args.push(format!("-upgrade={}", options.upgrade()));
                args.push("-input=false".to_string());
                args.push(format!("-lock={}", options.lock()));
                if options.no_color() {
                    args.push("-no-color".to_string());
                }
            }
            Phase::Plan => {
                args.push("-input=false".to_string());
                args.push(format!("-lock={}", options.lock()));
                if options.no_color() {
                    args.push("-no-color".to_string());
                }
                args.extend(options.var_args());
            }
            Phase::Validate => {
                if options.no_color() {
                    args.push("-no-color".to_string());
                }
            }
        }
        args
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Phase::Init),
            "plan" => Ok(Phase::Plan),
            "validate" => Ok(Phase::Validate),
            other => Err(format!("unknown phase {other:?} (expected init, plan, or validate)")),
        }
    }
}
