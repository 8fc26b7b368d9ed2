//! Environment-driven settings.

use crate::process::InvokeOptions;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::time::Duration;

/// Directory searched for scripts before the installed and source locations.
pub const SCRIPTS_DIR_ENV: &str = "REPOS_SCRIPTS_DIR";

/// Deadline for a script run, in whole seconds. Unset or `0` means no deadline.
pub const TIMEOUT_ENV: &str = "REPOS_TIMEOUT";

/// Log filter directive for the `repos` binary (e.g. `debug`, `repos=trace`).
pub const LOG_ENV: &str = "REPOS_LOG";

/// Settings for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub scripts_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let scripts_dir = lookup(SCRIPTS_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .map(|dir| std::path::absolute(&dir).unwrap_or(dir));

        let timeout = lookup(TIMEOUT_ENV).and_then(|raw| parse_timeout(&raw));

        Self {
            scripts_dir,
            timeout,
        }
    }

    #[must_use]
    pub fn invoke_options(&self) -> InvokeOptions {
        InvokeOptions {
            timeout: self.timeout,
        }
    }
}

fn parse_timeout(raw: &OsStr) -> Option<Duration> {
    let text = raw.to_string_lossy();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            tracing::warn!("ignoring {TIMEOUT_ENV}={text:?}: expected a whole number of seconds");
            None
        }
    }
}
