// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the jb binary.

use jb_engine::DEFAULT_RUNTIME;

/// Container runtime program: `JB_CONTAINER_RUNTIME` > `docker`
pub fn container_runtime() -> String {
    std::env::var("JB_CONTAINER_RUNTIME")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_RUNTIME.to_string())
}

/// Log filter directives from `JB_LOG` (default `info`)
pub fn log_filter() -> String {
    std::env::var("JB_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".to_string())
}
