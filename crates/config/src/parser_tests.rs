// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

const YAML_CONFIG: &str = r#"
env:
  GREETING: hello
  RETRIES: 3
jobs:
  - name: build app
    image: alpine:3
    scripts:
      - echo $GREETING
      - ls -la
    env:
      TARGET: ${GREETING}-world
  - name: test
    image: rust:1.80
"#;

#[test]
fn parse_yaml_config() {
    let config = parse_config_with_format(YAML_CONFIG, Format::Yaml).unwrap();
    assert_eq!(config.env.get("GREETING").map(String::as_str), Some("hello"));
    assert_eq!(config.env.get("RETRIES").map(String::as_str), Some("3"));
    assert_eq!(config.jobs.len(), 2);

    let build = &config.jobs[0];
    assert_eq!(build.name, "build app");
    assert_eq!(build.image, "alpine:3");
    assert_eq!(build.scripts, vec!["echo $GREETING", "ls -la"]);
    assert_eq!(build.env.get("TARGET").map(String::as_str), Some("${GREETING}-world"));

    let test = &config.jobs[1];
    assert!(test.scripts.is_empty());
    assert!(test.env.is_empty());
}

#[test]
fn parse_toml_config() {
    let toml = r#"
[env]
STAGE = "ci"

[[jobs]]
name = "build"
image = "alpine:3"
scripts = ["make", "make test"]

[jobs.env]
JOBS = 4
"#;
    let config = parse_config_with_format(toml, Format::Toml).unwrap();
    assert_eq!(config.env.get("STAGE").map(String::as_str), Some("ci"));
    assert_eq!(config.jobs[0].scripts, vec!["make", "make test"]);
    assert_eq!(config.jobs[0].env.get("JOBS").map(String::as_str), Some("4"));
}

#[test]
fn parse_json_config() {
    let json = r#"{"jobs": [{"name": "lint", "image": "node:20", "scripts": ["npm run lint"]}]}"#;
    let config = parse_config_with_format(json, Format::Json).unwrap();
    assert_eq!(config.jobs[0].name, "lint");
    assert!(config.env.is_empty());
}

#[test]
fn empty_yaml_is_empty_build() {
    let config = parse_config_with_format("\n  \n", Format::Yaml).unwrap();
    assert_eq!(config, jb_core::BuildConfig::default());
}

#[yare::parameterized(
    missing_image   = { "jobs:\n  - name: build\n" },
    jobs_not_a_list = { "jobs: build\n" },
    bad_syntax      = { "jobs: [\n" },
    scripts_mapping = { "jobs:\n  - name: a\n    image: b\n    scripts: {x: 1}\n" },
)]
fn invalid_yaml_is_parse_error(content: &str) {
    assert!(parse_config_with_format(content, Format::Yaml).is_err());
}

#[yare::parameterized(
    yaml    = { "build.yaml",   Format::Yaml },
    yml     = { ".jobbox.yml",  Format::Yaml },
    toml    = { "build.toml",   Format::Toml },
    json    = { "build.json",   Format::Json },
    no_ext  = { "Buildfile",    Format::Yaml },
    unknown = { "build.txt",    Format::Yaml },
)]
fn format_from_extension(path: &str, expected: Format) {
    assert_eq!(format_for_path(Path::new(path)), expected);
}

fn read_and_parse(path: &Path) -> Result<BuildConfig, ConfigError> {
    parse_config(path, &read_config(path)?)
}

#[test]
fn read_and_parse_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".jobbox.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(YAML_CONFIG.as_bytes()).unwrap();

    let config = read_and_parse(&path).unwrap();
    assert_eq!(config.jobs.len(), 2);
}

#[test]
fn read_config_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");
    let err = read_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("missing.yaml"));
}

#[test]
fn invalid_config_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "jobs: [\n").unwrap();
    let err = read_and_parse(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn config_file_allows_duplicate_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.yaml");
    std::fs::write(&path, "jobs:\n  - {name: a, image: x}\n  - {name: a, image: y}\n").unwrap();
    let config = read_and_parse(&path).unwrap();
    assert_eq!(config.jobs.len(), 2);
    assert_eq!(config.jobs[1].image, "y");
}

#[test]
fn parse_config_uses_path_extension() {
    let config = parse_config(Path::new("ci.json"), r#"{"env": {"A": "1"}}"#).unwrap();
    assert_eq!(config.env.get("A").map(String::as_str), Some("1"));

    let err = parse_config(Path::new("ci.toml"), r#"{"env": {"A": "1"}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("ci.toml"));
}

#[test]
fn yaml_env_values_keep_scalar_text() {
    let content = "\
env:
  PY: 3.10
  BIG: 1e3
  HEX: 0x1F
  U: 18446744073709551615
jobs:
  - name: a
    image: x
    env:
      PY: 3.10
";
    let config = parse_config_with_format(content, Format::Yaml).unwrap();
    let get = |k: &str| config.env.get(k).map(String::as_str);
    assert_eq!(get("PY"), Some("3.10"));
    assert_eq!(get("BIG"), Some("1e3"));
    assert_eq!(get("HEX"), Some("0x1F"));
    assert_eq!(get("U"), Some("18446744073709551615"));
    assert_eq!(config.jobs[0].env.get("PY").map(String::as_str), Some("3.10"));
}

#[test]
fn json_env_numbers_and_booleans_become_strings() {
    let content = r#"{
        "env": {"PORT": 8080, "DEBUG": true, "NAME": "api", "EMPTY": null},
        "jobs": [{"name": "a", "image": "x", "env": {"RATIO": 0.5, "QUIET": false}}]
    }"#;
    let config = parse_config_with_format(content, Format::Json).unwrap();
    let get = |k: &str| config.env.get(k).map(String::as_str);
    assert_eq!(get("PORT"), Some("8080"));
    assert_eq!(get("DEBUG"), Some("true"));
    assert_eq!(get("NAME"), Some("api"));
    assert_eq!(get("EMPTY"), Some(""));
    let job = &config.jobs[0].env;
    assert_eq!(job.get("RATIO").map(String::as_str), Some("0.5"));
    assert_eq!(job.get("QUIET").map(String::as_str), Some("false"));
}

#[test]
fn json_env_rejects_nested_values() {
    let content = r#"{"env": {"LIST": [1, 2]}}"#;
    assert!(parse_config_with_format(content, Format::Json).is_err());
}
