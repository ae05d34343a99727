// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jb-config: Loading build configuration files

mod parser;

pub use parser::{
    format_for_path, parse_config, parse_config_with_format, read_config, ConfigError,
    Format, ParseError,
};

/// Config file used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = ".jobbox.yaml";
