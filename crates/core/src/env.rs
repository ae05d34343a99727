// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable composition.
//!
//! Pure functions over `KEY -> VALUE` maps: parsing `KEY=VALUE` entries,
//! expanding `${NAME}` / `$NAME` references, and layering one map over
//! another. Maps are ordered by key so every rendering of an environment
//! (env files, process env arrays) is deterministic.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

/// An environment: variable name to value, ordered by name.
pub type EnvMap = BTreeMap<String, String>;

/// Regex for `${NAME}` or `$NAME` references.
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]*)\}|\$([A-Za-z0-9_]+)").expect("constant regex pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("malformed environment entry '{entry}': expected KEY=VALUE")]
    Malformed { entry: String },
}

/// Parse `KEY=VALUE` entries into a map.
///
/// Each entry is split on its first `=`, so values may themselves contain
/// `=`. Later duplicates overwrite earlier ones.
pub fn to_map<I, S>(pairs: I) -> Result<EnvMap, EnvError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = EnvMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let Some((key, value)) = pair.split_once('=') else {
            return Err(EnvError::Malformed { entry: pair.to_string() });
        };
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

/// Render a map as `KEY=VALUE` entries, sorted by key.
pub fn to_array(env: &EnvMap) -> Vec<String> {
    env.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
}

/// Substitute `${NAME}` and `$NAME` references in `value` from `lookup`.
///
/// References to names missing from `lookup` expand to the empty string,
/// the way a shell expands an unset variable.
pub fn expand_value(value: &str, lookup: &EnvMap) -> String {
    substitute(value, lookup, false)
}

/// Expand every value of `env` against `lookup`, producing a new map.
pub fn expand(env: &EnvMap, lookup: &EnvMap) -> EnvMap {
    env.iter().map(|(k, v)| (k.clone(), expand_value(v, lookup))).collect()
}

/// Like [`expand`], but references missing from `lookup` are left as written
/// so a later pass against another source can still resolve them.
fn expand_known(env: &EnvMap, lookup: &EnvMap) -> EnvMap {
    env.iter().map(|(k, v)| (k.clone(), substitute(v, lookup, true))).collect()
}

fn substitute(value: &str, lookup: &EnvMap, keep_unknown: bool) -> String {
    VAR_PATTERN
        .replace_all(value, |caps: &regex::Captures| {
            let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            match lookup.get(name) {
                Some(val) => val.clone(),
                None if keep_unknown => caps[0].to_string(),
                None => String::new(),
            }
        })
        .into_owned()
}

/// Layer `overlay` on top of `base`; overlay wins on key collisions.
pub fn merge(base: &EnvMap, overlay: &EnvMap) -> EnvMap {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Resolve the final environment of one job.
///
/// Build variables may reference host variables. Job variables may reference
/// build variables or host variables. Build variables never see job
/// variables.
pub fn resolve_job_env(host: &EnvMap, build: &EnvMap, job: &EnvMap) -> EnvMap {
    let build = expand(build, host);
    let job = expand(&expand_known(job, &build), host);
    merge(&build, &job)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
