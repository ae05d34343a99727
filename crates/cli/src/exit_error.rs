// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! The build returns `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` alone decides when the process ends.

use std::fmt;

/// Exit code for every failed run.
pub const FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    /// A failed run; the message has already been written to the build log.
    pub fn failure(message: impl Into<String>) -> Self {
        Self { code: FAILURE, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
