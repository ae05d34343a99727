//! Specs for running a build configuration end to end.

use crate::prelude::*;

const TWO_JOBS: &str = r#"
env:
  STAGE: ci
jobs:
  - name: compile
    image: alpine:3
    scripts:
      - make
      - echo done
  - name: unit tests
    image: alpine:3
    env:
      OUT: ${HOME}/${STAGE}
    scripts:
      - make test
"#;

const FIRST_FAILS: &str = r#"
jobs:
  - name: compile
    image: fail:latest
    scripts: [make]
  - name: unit tests
    image: alpine:3
    scripts: [make test]
"#;

#[test]
fn successful_build_runs_every_job() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", TWO_JOBS);

    temp.jb()
        .passes()
        .log_has("Reading config file from .jobbox.yaml")
        .log_has("Execute job: 'compile'")
        .log_has("Execute job: 'unit tests'")
        .log_has("DOCKER compile | running alpine:3")
        .log_has("SUCCESS!")
        .log_lacks("ERROR");

    assert_eq!(temp.runtime_calls().len(), 2);
}

#[test]
fn runtime_receives_the_invocation_contract() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", TWO_JOBS);

    temp.jb().passes();

    let calls = temp.runtime_calls();
    let work_dir = temp.path().canonicalize().unwrap();
    let expected = format!(
        "run -v {wd}:/var/jobbox --env-file {wd}/.jobbox/02-unit-tests.env \
         --entrypoint /var/jobbox/.jobbox/02-unit-tests.sh alpine:3",
        wd = work_dir.display()
    );
    assert_eq!(calls[1], expected);
}

#[test]
fn generated_files_land_in_temp_folder() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", TWO_JOBS);

    temp.jb().env("HOME", "/home/spec").passes();

    similar_asserts::assert_eq!(
        temp.read(".jobbox/01-compile.sh"),
        "#!/bin/sh\n\
         set -e\n\
         echo '/# cd /var/jobbox'\n\
         cd /var/jobbox\n\
         echo '/# make'\n\
         make\n\
         echo '/# echo done'\n\
         echo done\n"
    );
    assert_eq!(temp.read(".jobbox/01-compile.env"), "STAGE=ci\r\n");
    assert_eq!(temp.read(".jobbox/02-unit-tests.env"), "OUT=/home/spec/ci\r\nSTAGE=ci\r\n");
}

#[test]
fn first_failure_stops_the_build() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", FIRST_FAILS);

    temp.jb()
        .fails()
        .log_has("DOCKER compile | boom")
        .log_has("ERROR: Execution failed for build configuration .jobbox.yaml")
        .log_has("container exited with code 1")
        .log_has("Failed")
        .log_has("unit tests    NotRun    None")
        .log_lacks("Execute job: 'unit tests'")
        .log_lacks("SUCCESS!");

    assert_eq!(temp.runtime_calls().len(), 1);
}

#[test]
fn config_path_argument_selects_file() {
    let temp = Project::empty();
    temp.file("ci/build.toml", "[[jobs]]\nname = \"lint\"\nimage = \"alpine:3\"\nscripts = [\"true\"]\n");

    temp.jb()
        .args(&["ci/build.toml"])
        .passes()
        .log_has("Reading config file from ci/build.toml")
        .log_has("Execute job: 'lint'");
}

#[test]
fn missing_config_fails() {
    let temp = Project::empty();

    temp.jb()
        .fails()
        .log_has("ERROR: could not read config file .jobbox.yaml")
        .log_lacks("Parsing configuration");

    assert!(temp.runtime_calls().is_empty());
}

#[test]
fn invalid_config_fails_before_any_job() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", "jobs:\n  - name: build\n");

    temp.jb().fails().log_has("ERROR: could not parse config file").log_lacks("Execute job");

    assert!(temp.runtime_calls().is_empty());
    assert!(!temp.path().join(".jobbox").exists());
}

#[test]
fn runtime_flag_overrides_environment() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", TWO_JOBS);
    let runtime = temp.runtime();

    temp.jb()
        .env("JB_CONTAINER_RUNTIME", "/nonexistent/docker")
        .args(&["--runtime", runtime.to_str().unwrap()])
        .passes();

    assert_eq!(temp.runtime_calls().len(), 2);
}

#[test]
fn missing_runtime_program_fails_the_job() {
    let temp = Project::empty();
    temp.file(".jobbox.yaml", TWO_JOBS);

    temp.jb()
        .args(&["--runtime", "/nonexistent/docker"])
        .fails()
        .log_has("could not run `/nonexistent/docker`")
        .log_has("compile       Failed")
        .log_has("unit tests    NotRun    None");
}
