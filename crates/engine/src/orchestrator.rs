// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential execution of a build configuration.
//!
//! Jobs run one at a time in configuration order. The first job that fails
//! ends the run; jobs after it keep their `NotRun` status.

use crate::container::{ContainerInvocation, ContainerRuntime};
use crate::context::{BuildContext, BuildPaths};
use crate::error::BuildError;
use crate::log_redirect::LogRedirector;
use crate::materialize::ScriptMaterializer;
use jb_core::{env, BuildJob, Clock, EnvMap, JobState, JobStatusTracker, LogSink};
use std::sync::Arc;

/// Runs every job of a build through a container runtime.
pub struct BuildOrchestrator<R: ContainerRuntime> {
    runtime: R,
    sink: Arc<dyn LogSink>,
}

impl<R: ContainerRuntime> BuildOrchestrator<R> {
    pub fn new(runtime: R, sink: Arc<dyn LogSink>) -> Self {
        Self { runtime, sink }
    }

    /// Execute all jobs, stopping at the first failure.
    pub async fn execute<C: Clock>(&self, ctx: &mut BuildContext<C>) -> Result<(), BuildError> {
        let BuildContext { paths, config, host_env, tracker } = ctx;
        for (index, job) in config.jobs.iter().enumerate() {
            self.sink.separator();
            self.sink.line(&format!("Execute job: '{}'", job.name));
            self.sink.line("");
            let result = self.execute_job(index, job, &config.env, host_env, paths, tracker).await;
            self.sink.line("");
            result?;
            self.sink.line("SUCCESS!");
        }
        Ok(())
    }

    /// Write the status report for `ctx` to the sink.
    pub fn report<C: Clock>(&self, ctx: &BuildContext<C>) {
        ctx.tracker.report(self.sink.as_ref());
    }

    async fn execute_job<C: Clock>(
        &self,
        index: usize,
        job: &BuildJob,
        build_env: &EnvMap,
        host_env: &EnvMap,
        paths: &BuildPaths,
        tracker: &mut JobStatusTracker<C>,
    ) -> Result<(), BuildError> {
        let mut run = tracker.begin(index);

        let job_env = env::resolve_job_env(host_env, build_env, &job.env);
        let artifacts = match ScriptMaterializer::new(paths).materialize(index, job, &job_env) {
            Ok(artifacts) => artifacts,
            Err(source) => {
                run.set(JobState::EntryPointCreationError);
                return Err(BuildError::Artifact { job: job.name.clone(), source });
            }
        };

        let program = self.runtime.program();
        let invocation = ContainerInvocation::new(paths, &artifacts, job, job_env);
        self.sink.line(&format!("Executing {} command: {}", program, invocation.command_line(program)));
        tracing::debug!(
            job = %job.name,
            image = %job.image,
            vars = invocation.env.len(),
            "launching container"
        );

        let stdout = LogRedirector::for_job(&job.name, Arc::clone(&self.sink));
        let stderr = LogRedirector::for_job(&job.name, Arc::clone(&self.sink));
        self.runtime
            .run(&invocation, stdout, stderr)
            .await
            .map_err(|source| BuildError::Execution { job: job.name.clone(), source })?;

        run.set(JobState::Ok);
        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
