// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime invocation.
//!
//! A job runs as `<program> run -v <volume> --env-file <file> --entrypoint
//! <script> <image>`. The program is any docker-compatible CLI.

use crate::context::BuildPaths;
use crate::error::RuntimeError;
use crate::log_redirect::{pump, LogRedirector};
use crate::materialize::JobArtifacts;
use async_trait::async_trait;
use jb_core::{BuildJob, EnvMap};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Default container runtime program.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Everything needed to launch one job's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInvocation {
    pub image: String,
    /// `<host work dir>:<mount path>`
    pub volume: String,
    pub env_file: PathBuf,
    /// Entry-point script path inside the container.
    pub entrypoint: String,
    /// Resolved job environment, layered over the runtime's own environment.
    pub env: EnvMap,
}

impl ContainerInvocation {
    pub fn new(paths: &BuildPaths, artifacts: &JobArtifacts, job: &BuildJob, env: EnvMap) -> Self {
        Self {
            image: job.image.clone(),
            volume: paths.volume(),
            env_file: artifacts.env_file.clone(),
            entrypoint: artifacts.container_script.clone(),
            env,
        }
    }

    /// Runtime arguments, image last.
    pub fn args(&self) -> Vec<String> {
        vec![
            "run".to_string(),
            "-v".to_string(),
            self.volume.clone(),
            "--env-file".to_string(),
            self.env_file.display().to_string(),
            "--entrypoint".to_string(),
            self.entrypoint.clone(),
            self.image.clone(),
        ]
    }

    /// The full command line, as logged.
    pub fn command_line(&self, program: &str) -> String {
        let mut parts = vec![program.to_string()];
        parts.extend(self.args());
        parts.join(" ")
    }
}

/// Launches a job container and waits for it to exit.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Program name shown in the log.
    fn program(&self) -> &str;

    /// Run the container to completion, piping its stdout and stderr into
    /// the given redirectors.
    async fn run(
        &self,
        invocation: &ContainerInvocation,
        stdout: LogRedirector,
        stderr: LogRedirector,
    ) -> Result<(), RuntimeError>;
}

/// Runs containers through a docker-compatible CLI.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    program: String,
}

impl DockerRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for DockerRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME)
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(
        &self,
        invocation: &ContainerInvocation,
        stdout: LogRedirector,
        stderr: LogRedirector,
    ) -> Result<(), RuntimeError> {
        let launch_error =
            |source: std::io::Error| RuntimeError::Launch { program: self.program.clone(), source };

        let mut child = Command::new(&self.program)
            .args(invocation.args())
            .envs(&invocation.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(launch_error)?;

        let out_pipe = child.stdout.take();
        let err_pipe = child.stderr.take();
        let drain_out = async move {
            match out_pipe {
                Some(pipe) => pump(pipe, stdout).await,
                None => Ok(()),
            }
        };
        let drain_err = async move {
            match err_pipe {
                Some(pipe) => pump(pipe, stderr).await,
                None => Ok(()),
            }
        };

        let (out_result, err_result, status) = tokio::join!(drain_out, drain_err, child.wait());
        for (stream, result) in [("stdout", out_result), ("stderr", err_result)] {
            if let Err(e) = result {
                tracing::warn!(stream, error = %e, "failed reading container output");
            }
        }

        let status = status.map_err(launch_error)?;
        tracing::debug!(program = %self.program, image = %invocation.image, %status, "container exited");
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(RuntimeError::Exit { code }),
            None => Err(RuntimeError::Killed),
        }
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
