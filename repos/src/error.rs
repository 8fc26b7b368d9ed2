//! Error type shared by the locator, the process delegate and the dispatcher.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Exit code used for every dispatch-level failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Exit code reported when a script is killed after its deadline (matches `timeout(1)`).
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Errors raised while locating or running a script.
#[derive(Debug, thiserror::Error)]
pub enum ReposError {
    /// No lookup strategy produced an existing regular file.
    #[error("Cannot find {name}. Make sure the package is properly installed.")]
    NotFound {
        name: String,
        /// Every path that was checked, in lookup order.
        searched: Vec<PathBuf>,
    },

    /// The script ran and exited non-zero.
    #[error("{script} exited with status {code}")]
    ScriptFailed { script: String, code: i32 },

    /// The script outlived its deadline and was killed.
    #[error("{script} did not finish within {}s and was terminated", .timeout.as_secs())]
    TimedOut { script: String, timeout: Duration },

    #[error("failed to start {script}: {source}")]
    Spawn {
        script: String,
        #[source]
        source: io::Error,
    },

    #[error("failed while waiting for {script}: {source}")]
    Wait {
        script: String,
        #[source]
        source: io::Error,
    },
}

impl ReposError {
    /// Process exit code the dispatcher reports for this error.
    ///
    /// A failed script passes its own code through untouched.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptFailed { code, .. } => *code,
            Self::TimedOut { .. } => TIMEOUT_EXIT_CODE,
            Self::NotFound { .. } | Self::Spawn { .. } | Self::Wait { .. } => FAILURE_EXIT_CODE,
        }
    }

    /// Whether this is an unexpected failure rather than one of the reported kinds.
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Wait { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReposError>;
