// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented log output for a build run.
//!
//! Every component that reports progress writes fully formed lines to a
//! [`LogSink`] handed to it at construction. Timestamps and levels are the
//! sink's business.

#[cfg(any(test, feature = "test-support"))]
use parking_lot::Mutex;

/// Separator line printed between jobs and around the status report.
pub const SEPARATOR: &str = "-------------------------------------------------------------------";

/// Destination for build log lines.
pub trait LogSink: Send + Sync {
    /// Emit one complete log line (without a trailing newline).
    fn line(&self, line: &str);

    /// Emit the separator line.
    fn separator(&self) {
        self.line(SEPARATOR);
    }
}

/// Forwards build log lines to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn line(&self, line: &str) {
        tracing::info!(target: "jb::build", "{}", line);
    }
}

/// Captures log lines in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

#[cfg(any(test, feature = "test-support"))]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// True if any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|l| l.contains(needle))
    }
}

#[cfg(any(test, feature = "test-support"))]
impl LogSink for MemorySink {
    fn line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}
