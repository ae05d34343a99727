//! Shared harness for CLI specs.

use assert_cmd::Command;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Output;

/// Container runtime stand-in: records its arguments, prints a line, and
/// fails when the image name starts with `fail`.
const FAKE_RUNTIME: &str = r#"#!/bin/sh
for image; do :; done
echo "$*" >> "$(dirname "$0")/calls.log"
echo "running $image"
case "$image" in
  fail*) echo "boom" >&2; exit 1 ;;
esac
exit 0
"#;

/// `jb` with a clean environment: info logging and no runtime override.
pub fn cli() -> CliBuilder {
    let mut cmd = Command::cargo_bin("jb").expect("jb binary is built");
    cmd.env_remove("JB_CONTAINER_RUNTIME").env("JB_LOG", "info");
    CliBuilder { cmd }
}

/// A scratch project directory with a fake container runtime.
pub struct Project {
    dir: tempfile::TempDir,
    tools: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        let project = Self {
            dir: tempfile::tempdir().expect("project dir"),
            tools: tempfile::tempdir().expect("tools dir"),
        };
        let runtime = project.runtime();
        std::fs::write(&runtime, FAKE_RUNTIME).expect("write fake runtime");
        std::fs::set_permissions(&runtime, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake runtime");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the fake container runtime program.
    pub fn runtime(&self) -> PathBuf {
        self.tools.path().join("fake-docker")
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write project file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).expect("read project file")
    }

    /// One entry per fake runtime invocation: its space-joined arguments.
    pub fn runtime_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.tools.path().join("calls.log"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// `jb` running in this project with the fake runtime selected.
    pub fn jb(&self) -> CliBuilder {
        let mut builder = cli();
        builder.cmd.current_dir(self.path()).env("JB_CONTAINER_RUNTIME", self.runtime());
        builder
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("jb runs");
        let run = RunAssert { output };
        assert!(run.output.status.success(), "expected success\n{}", run.describe());
        run
    }

    /// Run and require exit code 1.
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().expect("jb runs");
        let run = RunAssert { output };
        assert_eq!(run.output.status.code(), Some(1), "expected exit 1\n{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// The build log (jb logs to stderr).
    pub fn log(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout missing {:?}\n{}", needle, self.describe());
        self
    }

    pub fn log_has(self, needle: &str) -> Self {
        assert!(self.log().contains(needle), "log missing {:?}\n{}", needle, self.describe());
        self
    }

    pub fn log_lacks(self, needle: &str) -> Self {
        assert!(!self.log().contains(needle), "log unexpectedly has {:?}\n{}", needle, self.describe());
        self
    }

    fn describe(&self) -> String {
        format!(
            "status: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.output.status,
            self.stdout(),
            self.log()
        )
    }
}
