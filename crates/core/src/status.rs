// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job status and duration tracking, and the end-of-run report.

use crate::clock::Clock;
use crate::job::BuildJob;
use crate::log_sink::LogSink;
use crate::time_fmt::format_duration;
use std::time::{Duration, Instant};

/// Terminal state recorded for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    NotRun,
    Ok,
    Failed,
    EntryPointCreationError,
}

crate::simple_display! {
    JobState {
        NotRun => "NotRun",
        Ok => "OK",
        Failed => "Failed",
        EntryPointCreationError => "EntryPointCreationError",
    }
}

/// Status row for one job position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub name: String,
    pub state: JobState,
    /// `None` until the job has finished.
    pub duration: Option<Duration>,
}

impl JobStatus {
    /// Duration as shown in the report; `"None"` when the job never ran.
    pub fn duration_label(&self) -> String {
        self.duration.map_or_else(|| "None".to_string(), format_duration)
    }
}

/// Tracks one status row per job, keyed by position in the job list.
///
/// Jobs run one at a time: at most one job is active between
/// [`start`](Self::start) and [`finish`](Self::finish).
#[derive(Debug)]
pub struct JobStatusTracker<C: Clock> {
    clock: C,
    rows: Vec<JobStatus>,
    active: Option<(usize, Instant)>,
}

impl<C: Clock> JobStatusTracker<C> {
    /// Register a `NotRun` row for every job, in configuration order.
    pub fn new(jobs: &[BuildJob], clock: C) -> Self {
        let rows = jobs
            .iter()
            .map(|job| JobStatus { name: job.name.clone(), state: JobState::NotRun, duration: None })
            .collect();
        Self { clock, rows, active: None }
    }

    pub fn rows(&self) -> &[JobStatus] {
        &self.rows
    }

    /// Mark the job at `index` as active and record its start time.
    pub fn start(&mut self, index: usize) {
        if let Some((previous, _)) = self.active {
            tracing::warn!(previous, index, "job started while another was still active");
        }
        self.active = Some((index, self.clock.now()));
    }

    /// Record `state` and the elapsed time for the active job.
    ///
    /// A no-op when no job is active.
    pub fn finish(&mut self, state: JobState) {
        let Some((index, started)) = self.active.take() else {
            return;
        };
        let elapsed = self.clock.now().saturating_duration_since(started);
        if let Some(row) = self.rows.get_mut(index) {
            row.state = state;
            row.duration = Some(elapsed);
        }
    }

    /// Start the job at `index` and return a guard that finishes it on drop.
    ///
    /// The guard records [`JobState::Failed`] unless told otherwise, so any
    /// early exit from the job body counts as a failure.
    pub fn begin(&mut self, index: usize) -> JobRun<'_, C> {
        self.start(index);
        JobRun { tracker: self, state: JobState::Failed }
    }

    /// True when every job finished with [`JobState::Ok`].
    #[cfg(any(test, feature = "test-support"))]
    pub fn all_ok(&self) -> bool {
        self.rows.iter().all(|r| r.state == JobState::Ok)
    }

    /// Render the report table as lines (no separators).
    pub fn table(&self) -> Vec<String> {
        let mut cells = vec![
            ["Job".to_string(), "Status".to_string(), "Duration".to_string()],
            ["---".to_string(), "------".to_string(), "--------".to_string()],
        ];
        for row in &self.rows {
            cells.push([row.name.clone(), row.state.to_string(), row.duration_label()]);
        }

        let mut widths = [0usize; 2];
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }

        cells
            .iter()
            .map(|[job, state, duration]| {
                format!(
                    "{:<w0$}{:<w1$}{}",
                    job,
                    state,
                    duration,
                    w0 = widths[0] + REPORT_PADDING,
                    w1 = widths[1] + REPORT_PADDING,
                )
            })
            .collect()
    }

    /// Write the status report to `sink`, bracketed by separator lines.
    pub fn report(&self, sink: &dyn LogSink) {
        sink.separator();
        sink.line("");
        for line in self.table() {
            sink.line(&line);
        }
        sink.line("");
        sink.separator();
    }
}

/// Space between report columns.
const REPORT_PADDING: usize = 4;

/// Scoped run of one job; finishes the job with its current state on drop.
pub struct JobRun<'a, C: Clock> {
    tracker: &'a mut JobStatusTracker<C>,
    state: JobState,
}

impl<C: Clock> JobRun<'_, C> {
    /// Set the state recorded when this run ends.
    pub fn set(&mut self, state: JobState) {
        self.state = state;
    }
}

impl<C: Clock> Drop for JobRun<'_, C> {
    fn drop(&mut self) {
        self.tracker.finish(self.state);
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
