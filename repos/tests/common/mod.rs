//! Common test helpers shared across integration tests

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)] // Not all helpers are used by every test file

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The `repos` binary next to the test executable, built on demand.
pub fn get_binary_path() -> PathBuf {
    let mut path = env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }

    path.push("repos");

    if !path.exists() {
        let build_output = Command::new("cargo")
            .args(["build", "--bin", "repos"])
            .output()
            .expect("Failed to build binary");

        assert!(
            build_output.status.success(),
            "Failed to build repos binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    path
}

/// Helper to create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Write a `#!/bin/sh` script into `dir`. The binary is expected to chmod it.
pub fn create_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    path
}

/// Helper to check if a POSIX shell is available on the system
pub fn is_sh_available() -> bool {
    which::which("sh").is_ok()
}

/// Package version for testing --version flag
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper to create a Command with test environment
/// Points the script lookup at `scripts_dir` and clears settings inherited from the caller
pub fn test_command(binary: &PathBuf, scripts_dir: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env("REPOS_SCRIPTS_DIR", scripts_dir);
    cmd.env_remove("REPOS_TIMEOUT");
    cmd.env_remove("REPOS_LOG");
    cmd
}
