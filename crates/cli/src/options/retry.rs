// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retry policy for transient tool errors.

use crate::config::RetryConfig;
use regex::Regex;
use std::time::Duration;

/// Transient provider/registry/network failures worth another attempt.
pub const DEFAULT_RETRYABLE_ERRORS: &[(&str, &str)] = &[
    (
        ".*timeout while waiting for plugin to start.*",
        "Provider plugin did not start in time",
    ),
    (
        ".*timed out waiting for server handshake.*",
        "Provider plugin handshake timed out",
    ),
    (
        ".*Failed to query available provider packages.*",
        "Provider registry unreachable",
    ),
    (
        ".*could not query provider registry for.*",
        "Provider registry unreachable",
    ),
    (
        ".*registry service is unreachable.*",
        "Provider registry unreachable",
    ),
    (
        ".*Error installing provider.*",
        "Provider download failed",
    ),
    (
        ".*unable to verify checksum.*",
        "Provider download corrupted",
    ),
    (
        ".*Could not download module.*",
        "Module download failed",
    ),
    (".*TLS handshake timeout.*", "Network timeout"),
    (".*connection reset by peer.*", "Network connection reset"),
    (".*i/o timeout.*", "Network timeout"),
    (".*no such host.*", "DNS lookup failed"),
    (".*unexpected EOF.*", "Connection closed early"),
];

/// A retryable error pattern
#[derive(Clone, Debug)]
pub struct RetryableError {
    pub pattern: Regex,
    pub description: String,
}

/// When and how often a failed invocation is retried
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub time_between: Duration,
    errors: Vec<RetryableError>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// No retries: the first failure is final.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            time_between: Duration::from_secs(5),
            errors: Vec::new(),
        }
    }

    /// Three retries, five seconds apart, on the built-in transient errors.
    pub fn default_retryable() -> Self {
        let errors = DEFAULT_RETRYABLE_ERRORS
            .iter()
            .filter_map(|(pattern, description)| {
                Regex::new(pattern).ok().map(|pattern| RetryableError {
                    pattern,
                    description: (*description).to_string(),
                })
            })
            .collect();
        Self {
            max_retries: 3,
            time_between: Duration::from_secs(5),
            errors,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Result<Self, regex::Error> {
        let mut policy = if config.use_defaults {
            Self::default_retryable()
        } else {
            Self::none()
        };
        policy.max_retries = config.max_retries;
        policy.time_between = Duration::from_secs(config.time_between_secs);
        for (pattern, description) in &config.errors {
            policy = policy.with_error(pattern, description)?;
        }
        Ok(policy)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_time_between(mut self, time_between: Duration) -> Self {
        self.time_between = time_between;
        self
    }

    /// Add a retryable pattern
    pub fn with_error(mut self, pattern: &str, description: &str) -> Result<Self, regex::Error> {
        self.errors.push(RetryableError {
            pattern: Regex::new(pattern)?,
            description: description.to_string(),
        });
        Ok(self)
    }

    pub fn errors(&self) -> &[RetryableError] {
        &self.errors
    }

    /// Whether any retry can happen at all
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0 && !self.errors.is_empty()
    }

    /// Description of the first pattern matching `output`, if any
    pub fn matching_error(&self, output: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.pattern.is_match(output))
            .map(|e| e.description.as_str())
    }

    /// Whether a failure on `attempt` (1-based) with `output` gets another try
    pub fn should_retry(&self, attempt: u32, output: &str) -> Option<&str> {
        if attempt > self.max_retries {
            return None;
        }
        self.matching_error(output)
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
