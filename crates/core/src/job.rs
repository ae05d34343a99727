// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build configuration: the ordered job list and its environments.

use crate::env::EnvMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One named unit of work, run inside one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildJob {
    /// Display name; used in log prefixes and the status report.
    pub name: String,
    /// Container image reference (e.g. "rust:1.80").
    pub image: String,
    /// Shell lines, run in order by one script.
    #[serde(default)]
    pub scripts: Vec<String>,
    /// Job-level variables; may reference build and host variables.
    #[serde(default, deserialize_with = "deserialize_env")]
    pub env: EnvMap,
}

crate::builder! {
    pub struct BuildJobBuilder => BuildJob {
        into {
            name: String = "build",
            image: String = "alpine:3",
        }
        set {
            scripts: Vec<String> = Vec::new(),
            env: EnvMap = EnvMap::new(),
        }
    }
}

impl BuildJob {
    /// Filesystem-safe token derived from the job name.
    ///
    /// Spaces and path separators become hyphens.
    pub fn sanitized_name(&self) -> String {
        self.name.replace([' ', '/', '\\'], "-")
    }

    /// Stem for this job's generated files, given its 0-based position.
    ///
    /// The 1-based ordinal prefix keeps stems unique even when two names
    /// sanitize to the same token.
    pub fn artifact_stem(&self, index: usize) -> String {
        format!("{:02}-{}", index + 1, self.sanitized_name())
    }
}

/// A full build: build-wide defaults plus the ordered jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default, deserialize_with = "deserialize_env")]
    pub env: EnvMap,
    #[serde(default)]
    pub jobs: Vec<BuildJob>,
}

/// Accepts scalar values of any kind and keeps their textual form, so
/// `PORT: 8080` and `GO_VERSION: 1.20` work without quoting. A null value is
/// the empty string.
fn deserialize_env<'de, D>(deserializer: D) -> Result<EnvMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<EnvValue>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.map(|v| v.0).unwrap_or_default()))
        .collect())
}

/// One env value as written in the config file.
///
/// Asks for a string first, so YAML hands over the scalar text untouched
/// (`3.10` stays `3.10`). Typed formats fall back to the typed visits.
struct EnvValue(String);

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(EnvValueVisitor).map(EnvValue)
    }
}

struct EnvValueVisitor;

impl Visitor<'_> for EnvValueVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
