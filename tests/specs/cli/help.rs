//! CLI help output specs

use crate::prelude::*;

#[test]
fn jb_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("[CONFIG]");
}

#[test]
fn jb_help_documents_runtime_override() {
    cli().args(&["--help"]).passes().stdout_has("--runtime").stdout_has("JB_CONTAINER_RUNTIME");
}

#[test]
fn jb_version_prints_version() {
    cli().args(&["--version"]).passes().stdout_has(env!("CARGO_PKG_VERSION"));
}
