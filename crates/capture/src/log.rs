// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared invocation log with an optional JSONL sink.
//!
//! Sequence numbers are assigned under the same lock that appends the
//! record, so they are unique across clones and survive `clear()`.

use crate::record::{InvocationArgs, InvocationOutcome, InvocationRecord};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Log of tool invocations. Clones share the same records and sink.
#[derive(Clone)]
pub struct CaptureLog {
    start: Instant,
    state: Arc<Mutex<LogState>>,
}

struct LogState {
    next_seq: u64,
    records: Vec<InvocationRecord>,
    sink: Option<BufWriter<File>>,
}

impl LogState {
    fn append(&mut self, record: InvocationRecord) {
        if let Some(sink) = self.sink.as_mut() {
            // A broken sink must not fail the invocation being recorded.
            if let Ok(line) = serde_json::to_string(&record) {
                let _ = writeln!(sink, "{line}").and_then(|()| sink.flush());
            }
        }
        self.records.push(record);
    }
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::with_sink(None)
    }

    /// Log that also appends each record as one JSON line to `path`.
    /// An existing file is truncated.
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_sink(Some(BufWriter::new(file))))
    }

    fn with_sink(sink: Option<BufWriter<File>>) -> Self {
        Self {
            start: Instant::now(),
            state: Arc::new(Mutex::new(LogState {
                next_seq: 0,
                records: Vec::new(),
                sink,
            })),
        }
    }

    /// Record an invocation and return its sequence number
    pub fn record(&self, args: InvocationArgs, outcome: InvocationOutcome) -> u64 {
        let mut state = self.state.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.append(InvocationRecord {
            seq,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            args,
            outcome,
        });
        seq
    }

    pub fn records(&self) -> Vec<InvocationRecord> {
        self.select(|_| true)
    }

    /// The last `n` records, oldest first
    pub fn last(&self, n: usize) -> Vec<InvocationRecord> {
        let state = self.state.lock();
        let skip = state.records.len().saturating_sub(n);
        state.records[skip..].to_vec()
    }

    pub fn find_by_phase(&self, phase: &str) -> Vec<InvocationRecord> {
        self.select(|r| r.args.phase == phase)
    }

    /// Records whose outcome is a failure, including failed retry attempts
    pub fn failures(&self) -> Vec<InvocationRecord> {
        self.select(|r| r.outcome.is_failure())
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    /// Drop in-memory records. The JSONL file and the sequence counter are
    /// left as they are.
    pub fn clear(&self) {
        self.state.lock().records.clear();
    }

    fn select(&self, keep: impl Fn(&InvocationRecord) -> bool) -> Vec<InvocationRecord> {
        self.state
            .lock()
            .records
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect()
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CaptureLog")
            .field("records", &state.records.len())
            .field("next_seq", &state.next_seq)
            .field("file", &state.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
