//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A port nothing listens on (reserved, connect is refused)
pub const CLOSED_ADDR: &str = "127.0.0.1:1";

/// A scratch directory holding configuration files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `rel` under the project directory
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// A `zgw` invocation running inside the project directory
    pub fn zgw(&self) -> CliRun {
        let mut cmd = zgw();
        cmd.current_dir(self.path());
        CliRun { cmd }
    }
}

/// A `zgw` command with logging pinned so output is stable
pub fn zgw() -> Command {
    let mut cmd = Command::new(zgw_bin());
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Path to the `zgw` binary. The binary belongs to another workspace
/// package, so `CARGO_BIN_EXE_zgw` is not set here; fall back to the
/// target directory next to this test executable.
fn zgw_bin() -> std::path::PathBuf {
    if let Some(p) = std::env::var_os("CARGO_BIN_EXE_zgw") {
        return p.into();
    }
    let exe = std::env::current_exe().unwrap();
    let mut dir = exe.parent().unwrap().to_path_buf();
    if dir.ends_with("deps") {
        dir.pop();
    }
    dir.join(format!("zgw{}", std::env::consts::EXE_SUFFIX))
}

pub struct CliRun {
    cmd: Command,
}

impl CliRun {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(outcome.success, "expected success, stderr:\n{}", outcome.stderr);
        outcome
    }

    pub fn fails(mut self) -> Outcome {
        let output = self.cmd.output().unwrap();
        let outcome = Outcome::from(output);
        assert!(!outcome.success, "expected failure, stdout:\n{}", outcome.stdout);
        outcome
    }
}

pub struct Outcome {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for Outcome {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Outcome {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {needle:?}:\n{}",
            self.stderr
        );
        self
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }
}

pub const MINIMAL_CONFIG: &str = r#"
cluster_addrs = ["meta-1:9221", "meta-2:9221"]
kv_addr = "kv-1:6379"

[lock]
identity = "gw-node-1"
lease = "30s"
"#;
