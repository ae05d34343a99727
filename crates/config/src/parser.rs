// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build configuration parsing (YAML, TOML, JSON)

use jb_core::BuildConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Toml,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// A syntax or schema error reported by the format's parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Pick the format from a file extension; anything unrecognized is YAML.
pub fn format_for_path(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Format::Toml,
        Some("json") => Format::Json,
        _ => Format::Yaml,
    }
}

/// Parse configuration text in the given format.
pub fn parse_config_with_format(content: &str, format: Format) -> Result<BuildConfig, ParseError> {
    let parsed = match format {
        // An empty YAML document is an empty build, not an error.
        Format::Yaml if content.trim().is_empty() => Ok(BuildConfig::default()),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        Format::Json => parse_json(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(ParseError)
}

fn parse_json(content: &str) -> Result<BuildConfig, serde_json::Error> {
    let mut value: serde_json::Value = serde_json::from_str(content)?;
    stringify_env_scalars(&mut value);
    serde_json::from_value(value)
}

/// JSON has typed scalars only, so numbers and booleans in `env` maps are
/// turned into their JSON text before the model sees them.
fn stringify_env_scalars(value: &mut serde_json::Value) {
    let Some(root) = value.as_object_mut() else {
        return;
    };
    stringify_env(root.get_mut("env"));
    if let Some(jobs) = root.get_mut("jobs").and_then(serde_json::Value::as_array_mut) {
        for job in jobs {
            stringify_env(job.get_mut("env"));
        }
    }
}

fn stringify_env(env: Option<&mut serde_json::Value>) {
    let Some(vars) = env.and_then(serde_json::Value::as_object_mut) else {
        return;
    };
    for value in vars.values_mut() {
        if value.is_number() || value.is_boolean() {
            *value = serde_json::Value::String(value.to_string());
        }
    }
}

/// Read the configuration file at `path`.
pub fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })
}

/// Parse configuration text read from `path`, picking the format from its
/// extension.
pub fn parse_config(path: &Path, content: &str) -> Result<BuildConfig, ConfigError> {
    let format = format_for_path(path);
    let config = parse_config_with_format(content, format)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

    tracing::debug!(
        path = %path.display(),
        ?format,
        jobs = config.jobs.len(),
        env = config.env.len(),
        "loaded build config"
    );
    warn_duplicate_names(&config);
    Ok(config)
}

/// Duplicate names are allowed, but they make logs and reports ambiguous.
fn warn_duplicate_names(config: &BuildConfig) {
    let mut seen = HashSet::new();
    for job in &config.jobs {
        if !seen.insert(job.name.as_str()) {
            tracing::warn!(job = %job.name, "duplicate job name in build config");
        }
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
