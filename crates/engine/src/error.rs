// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for build execution.

use jb_core::EnvError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to set up the per-run build context.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("could not determine working directory: {0}")]
    WorkDir(#[source] std::io::Error),

    #[error("could not create temp folder {}: {source}", path.display())]
    TempFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid host environment: {0}")]
    HostEnv(#[from] EnvError),
}

/// Failure to write a job's entry-point script or env file.
#[derive(Debug, Error)]
#[error("could not write {}: {source}", path.display())]
pub struct ArtifactError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Failure while running a job's container.
///
/// Both variants are reported as a failed job; they are kept apart so the
/// log says whether the container ran at all.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not run `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("container exited with code {code}")]
    Exit { code: i32 },

    #[error("container was terminated by a signal")]
    Killed,
}

/// A job that ended the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("job '{job}': entry point creation failed: {source}")]
    Artifact {
        job: String,
        #[source]
        source: ArtifactError,
    },

    #[error("job '{job}' failed: {source}")]
    Execution {
        job: String,
        #[source]
        source: RuntimeError,
    },
}

impl BuildError {
    /// Name of the job that failed.
    pub fn job(&self) -> &str {
        match self {
            BuildError::Artifact { job, .. } | BuildError::Execution { job, .. } => job,
        }
    }
}
