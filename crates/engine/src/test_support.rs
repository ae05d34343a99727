// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted container runtime for tests.

use crate::container::{ContainerInvocation, ContainerRuntime};
use crate::error::RuntimeError;
use crate::log_redirect::LogRedirector;
use async_trait::async_trait;
use jb_core::FakeClock;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Scripted result of one fake container run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeOutcome {
    /// The container exits with this code.
    Exit(i32),
    /// The runtime program cannot be started.
    LaunchFailure,
}

#[derive(Default)]
struct FakeRuntimeState {
    calls: Vec<ContainerInvocation>,
    outcomes: VecDeque<FakeOutcome>,
    output: Vec<u8>,
    clock: Option<(FakeClock, Duration)>,
}

/// Records invocations and replays scripted outcomes.
///
/// Runs exit 0 once the scripted outcomes are used up.
#[derive(Clone, Default)]
pub struct FakeRuntime {
    inner: Arc<Mutex<FakeRuntimeState>>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next run.
    pub fn push_outcome(&self, outcome: FakeOutcome) -> &Self {
        self.inner.lock().outcomes.push_back(outcome);
        self
    }

    /// Bytes written to stdout by every run.
    pub fn set_output(&self, bytes: &[u8]) -> &Self {
        self.inner.lock().output = bytes.to_vec();
        self
    }

    /// Advance `clock` by `step` during every run.
    pub fn advance_clock(&self, clock: &FakeClock, step: Duration) -> &Self {
        self.inner.lock().clock = Some((clock.clone(), step));
        self
    }

    pub fn calls(&self) -> Vec<ContainerInvocation> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    fn program(&self) -> &str {
        "fake-docker"
    }

    async fn run(
        &self,
        invocation: &ContainerInvocation,
        mut stdout: LogRedirector,
        _stderr: LogRedirector,
    ) -> Result<(), RuntimeError> {
        let (outcome, output) = {
            let mut state = self.inner.lock();
            state.calls.push(invocation.clone());
            if let Some((clock, step)) = &state.clock {
                clock.advance(*step);
            }
            (state.outcomes.pop_front().unwrap_or(FakeOutcome::Exit(0)), state.output.clone())
        };

        match outcome {
            FakeOutcome::LaunchFailure => Err(RuntimeError::Launch {
                program: self.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
            FakeOutcome::Exit(code) => {
                stdout.feed(&output);
                if code == 0 {
                    Ok(())
                } else {
                    Err(RuntimeError::Exit { code })
                }
            }
        }
    }
}
