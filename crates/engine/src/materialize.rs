// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generated per-job files: the container entry-point script and env file.
//!
//! Both land in the temp folder as `<stem>.sh` / `<stem>.env`, where the stem
//! comes from [`BuildJob::artifact_stem`].

use crate::context::BuildPaths;
use crate::error::ArtifactError;
use jb_core::{BuildJob, EnvMap};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Files written for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobArtifacts {
    /// Entry-point script on the host.
    pub script: PathBuf,
    /// Entry-point script as the container sees it.
    pub container_script: String,
    /// Env file on the host.
    pub env_file: PathBuf,
}

/// Writes job artifacts into the temp folder of a build.
pub struct ScriptMaterializer<'a> {
    paths: &'a BuildPaths,
}

impl<'a> ScriptMaterializer<'a> {
    pub fn new(paths: &'a BuildPaths) -> Self {
        Self { paths }
    }

    /// Write both the entry point and the env file for the job at `index`.
    pub fn materialize(
        &self,
        index: usize,
        job: &BuildJob,
        env: &EnvMap,
    ) -> Result<JobArtifacts, ArtifactError> {
        let stem = job.artifact_stem(index);
        let script = self.write_entry_point(&stem, job)?;
        let env_file = self.write_env_file(&stem, env)?;
        Ok(JobArtifacts {
            script,
            container_script: self.paths.container_path(&format!("{}.sh", stem)),
            env_file,
        })
    }

    /// Write `<stem>.sh` and make it executable.
    pub fn write_entry_point(&self, stem: &str, job: &BuildJob) -> Result<PathBuf, ArtifactError> {
        let path = self.paths.artifact_path(&format!("{}.sh", stem));
        let content = entry_point_script(job, &self.paths.mount_path);
        write_artifact(&path, &content)?;
        make_executable(&path)?;
        tracing::debug!(job = %job.name, path = %path.display(), "wrote entry point");
        Ok(path)
    }

    /// Write `<stem>.env`.
    pub fn write_env_file(&self, stem: &str, env: &EnvMap) -> Result<PathBuf, ArtifactError> {
        let path = self.paths.artifact_path(&format!("{}.env", stem));
        write_artifact(&path, &env_file_contents(env))?;
        tracing::debug!(path = %path.display(), vars = env.len(), "wrote env file");
        Ok(path)
    }
}

/// Render the entry-point script for `job`.
///
/// The script fails fast (`set -e`), switches to the mount path, and echoes
/// a `/# <command>` trace before each command so the container output reads
/// as a transcript.
pub fn entry_point_script(job: &BuildJob, mount_path: &str) -> String {
    let mut script = String::from("#!/bin/sh\nset -e\n");
    let cd = format!("cd {}", mount_path);
    push_traced(&mut script, &cd);
    for line in &job.scripts {
        push_traced(&mut script, line);
    }
    script
}

fn push_traced(script: &mut String, command: &str) {
    let _ = writeln!(script, "echo {}", quote_for_shell(&format!("/# {}", command)));
    let _ = writeln!(script, "{}", command);
}

/// Single-quote `s` for the shell (`'` becomes `'\''`).
fn quote_for_shell(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Render an env file: one `KEY=VALUE` per line, CRLF-terminated, sorted by key.
pub fn env_file_contents(env: &EnvMap) -> String {
    jb_core::env::to_array(env).into_iter().map(|entry| entry + "\r\n").collect()
}

fn write_artifact(path: &Path, content: &str) -> Result<(), ArtifactError> {
    std::fs::write(path, content)
        .map_err(|source| ArtifactError { path: path.to_path_buf(), source })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ArtifactError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|source| ArtifactError { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ArtifactError> {
    Ok(())
}

#[cfg(test)]
#[path = "materialize_tests.rs"]
mod tests;
