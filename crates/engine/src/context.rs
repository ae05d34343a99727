// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run build state: paths, configuration, host environment and job
//! status rows.

use crate::error::ContextError;
use jb_core::{env, BuildConfig, Clock, EnvMap, JobStatusTracker};
use std::path::{Path, PathBuf};

/// Name of the folder (under the working directory) holding generated files.
pub const TEMP_FOLDER_NAME: &str = ".jobbox";

/// Where the working directory is mounted inside every container.
pub const MOUNT_PATH: &str = "/var/jobbox";

/// Host and container locations used by a build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub work_dir: PathBuf,
    pub temp_folder_name: String,
    pub temp_folder: PathBuf,
    pub mount_path: String,
}

impl BuildPaths {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        let temp_folder = work_dir.join(TEMP_FOLDER_NAME);
        Self {
            work_dir,
            temp_folder_name: TEMP_FOLDER_NAME.to_string(),
            temp_folder,
            mount_path: MOUNT_PATH.to_string(),
        }
    }

    /// Host path of a generated file in the temp folder.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.temp_folder.join(file_name)
    }

    /// Path of a generated file as seen from inside the container.
    pub fn container_path(&self, file_name: &str) -> String {
        format!("{}/{}/{}", self.mount_path, self.temp_folder_name, file_name)
    }

    /// Volume argument mounting the working directory at the mount path.
    pub fn volume(&self) -> String {
        format!("{}:{}", self.work_dir.display(), self.mount_path)
    }
}

/// Mutable state of one build run.
///
/// The temp folder is created once and left in place after the run.
#[derive(Debug)]
pub struct BuildContext<C: Clock> {
    pub paths: BuildPaths,
    pub config: BuildConfig,
    pub host_env: EnvMap,
    pub tracker: JobStatusTracker<C>,
}

impl<C: Clock> BuildContext<C> {
    /// Create the context, parsing `host_env` (`KEY=VALUE` entries) and
    /// creating the temp folder under `work_dir`.
    pub fn create<I, S>(
        config: BuildConfig,
        work_dir: &Path,
        host_env: I,
        clock: C,
    ) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let host_env = env::to_map(host_env)?;
        let paths = BuildPaths::new(work_dir);

        std::fs::create_dir_all(&paths.temp_folder).map_err(|source| {
            ContextError::TempFolder { path: paths.temp_folder.clone(), source }
        })?;
        tracing::debug!(
            temp_folder = %paths.temp_folder.display(),
            host_vars = host_env.len(),
            "created build context"
        );

        let tracker = JobStatusTracker::new(&config.jobs, clock);
        Ok(Self { paths, config, host_env, tracker })
    }
}

/// The current process environment as `KEY=VALUE` entries.
///
/// Non-UTF-8 names or values are converted lossily.
pub fn host_environment() -> Vec<String> {
    std::env::vars_os()
        .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
        .collect()
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
