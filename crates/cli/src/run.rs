// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The build command: load the configuration, run every job, print the
//! status report.

use crate::exit_error::ExitError;
use jb_config::{parse_config, read_config};
use jb_core::{Clock, LogSink};
use jb_engine::{host_environment, BuildContext, BuildOrchestrator, ContainerRuntime, ContextError};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

/// Process inputs of one build run.
#[derive(Debug, Clone)]
pub struct BuildRun {
    pub config_path: PathBuf,
    pub work_dir: PathBuf,
    /// Host environment as `KEY=VALUE` entries.
    pub host_env: Vec<String>,
}

impl BuildRun {
    /// Run against the current working directory and process environment.
    pub fn for_current_process(config_path: PathBuf) -> Result<Self, ContextError> {
        let work_dir = std::env::current_dir().map_err(ContextError::WorkDir)?;
        Ok(Self { config_path, work_dir, host_env: host_environment() })
    }

    /// Execute the build, logging progress to `sink`.
    ///
    /// Every failure is logged as an `ERROR:` line before it is returned.
    /// The status report is printed whenever jobs were attempted.
    pub async fn execute<R, C>(
        &self,
        runtime: R,
        clock: C,
        sink: Arc<dyn LogSink>,
    ) -> Result<(), ExitError>
    where
        R: ContainerRuntime,
        C: Clock,
    {
        let path = &self.config_path;
        sink.line(&format!("Reading config file from {}", path.display()));
        let content = read_config(path).map_err(|e| fail(sink.as_ref(), e))?;

        sink.line("Parsing configuration");
        let config = parse_config(path, &content).map_err(|e| fail(sink.as_ref(), e))?;

        let mut ctx = BuildContext::create(config, &self.work_dir, &self.host_env, clock)
            .map_err(|e| fail(sink.as_ref(), format!("could not create build context: {}", e)))?;

        sink.line("Starting build execution");
        let orchestrator = BuildOrchestrator::new(runtime, Arc::clone(&sink));
        let result = orchestrator.execute(&mut ctx).await;
        if let Err(e) = &result {
            sink.line(&format!(
                "ERROR: Execution failed for build configuration {}: {}",
                path.display(),
                e
            ));
        }
        orchestrator.report(&ctx);
        result.map_err(|e| ExitError::failure(e.to_string()))
    }
}

/// Log `error` and turn it into a failed exit.
pub fn fail(sink: &dyn LogSink, error: impl Display) -> ExitError {
    let message = error.to_string();
    sink.line(&format!("ERROR: {}", message));
    ExitError::failure(message)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
