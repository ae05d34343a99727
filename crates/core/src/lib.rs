// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jb-core: Build model, environment composition and job status tracking
//! for the jobbox (jb) build runner

pub mod macros;

pub mod clock;
pub mod env;
pub mod job;
pub mod log_sink;
pub mod status;
pub mod time_fmt;

pub use clock::{Clock, FakeClock, SystemClock};
pub use env::{EnvError, EnvMap};
#[cfg(any(test, feature = "test-support"))]
pub use job::BuildJobBuilder;
pub use job::{BuildConfig, BuildJob};
#[cfg(any(test, feature = "test-support"))]
pub use log_sink::MemorySink;
pub use log_sink::{LogSink, TracingSink, SEPARATOR};
pub use status::{JobRun, JobState, JobStatus, JobStatusTracker};
pub use time_fmt::format_duration;
