// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Phase;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no tofu or terraform binary found on PATH (set LZHARNESS_BINARY or pass --binary)")]
    BinaryNotFound,

    #[error("binary {0} does not exist")]
    MissingBinary(PathBuf),

    #[error("failed to spawn {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error during {phase}: {source}")]
    Io {
        phase: Phase,
        #[source]
        source: std::io::Error,
    },

    #[error("{phase} timed out after {after:?}")]
    Timeout { phase: Phase, after: Duration },

    #[error("{phase} exited with status {}:\n{output}", status(.code))]
    NonZeroExit {
        phase: Phase,
        code: Option<i32>,
        output: String,
    },
}

fn status(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

impl RunError {
    /// Captured tool output, when the tool got far enough to produce any
    pub fn output(&self) -> Option<&str> {
        match self {
            RunError::NonZeroExit { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::NonZeroExit { code, .. } => *code,
            _ => None,
        }
    }
}
