// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jb-engine: Build execution for jobbox
//!
//! Materializes per-job scripts, launches containers and streams their
//! output into the build log.

mod container;
mod context;
mod error;
mod log_redirect;
mod materialize;
mod orchestrator;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use container::{ContainerInvocation, ContainerRuntime, DockerRuntime, DEFAULT_RUNTIME};
pub use context::{host_environment, BuildContext, BuildPaths, MOUNT_PATH, TEMP_FOLDER_NAME};
pub use error::{ArtifactError, BuildError, ContextError, RuntimeError};
pub use log_redirect::{pump, LogRedirector};
pub use materialize::{env_file_contents, entry_point_script, JobArtifacts, ScriptMaterializer};
pub use orchestrator::BuildOrchestrator;
