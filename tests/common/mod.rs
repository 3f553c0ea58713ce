//! Shared integration-test harness for running the `ncma-linker` binary
//! inside a scratch working directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// A scratch working directory with helpers for invoking the binary in it.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Creates a workspace whose `ncma.txt` holds `content`.
    pub fn with_input(content: &str) -> Self {
        let ws = Self::new();
        ws.write("ncma.txt", content);
        ws
    }

    /// Creates a workspace whose `ncma.txt` is a copy of a fixture file.
    pub fn with_fixture(name: &str) -> Self {
        let content = std::fs::read_to_string(fixture_path(name)).expect("fixture not found");
        Self::with_input(&content)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("failed to write file");
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("failed to read file")
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Runs the binary with `args` in this workspace and waits for it.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ncma-linker"))
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("NCMA_LINKER_LOG_LEVEL")
            .env_remove("NCMA_LINKER_LOG_FORMAT")
            .output()
            .expect("failed to run ncma-linker")
    }
}

/// Returns the absolute path to a fixture under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Builds a ten-field record with the given identifier and link column.
pub fn record(id: &str, link: &str) -> serde_json::Value {
    serde_json::json!([id, "a", "b", "c", "d", "e", "f", "g", "h", link])
}

/// Stderr of `output` as a lossy string, for assertion messages.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Stdout of `output` as a lossy string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
