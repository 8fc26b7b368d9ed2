//! Running a located script as a child process.

use crate::error::{ReposError, Result};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// How often a child with a deadline is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of the best-effort attempt to mark a script executable.
#[derive(Debug)]
pub enum PermissionOutcome {
    Updated,
    Failed(io::Error),
    /// No executable bit on this platform.
    Unsupported,
}

/// Set mode `0o755` on `path`. Failure is reported, never raised.
pub fn ensure_executable(path: &Path) -> PermissionOutcome {
    #[cfg(unix)]
    {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        match fs::set_permissions(path, fs::Permissions::from_mode(0o755)) {
            Ok(()) => {
                tracing::debug!("marked {} executable", path.display());
                PermissionOutcome::Updated
            }
            Err(e) => {
                tracing::debug!(
                    "could not mark {} executable, running anyway: {e}",
                    path.display()
                );
                PermissionOutcome::Failed(e)
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        PermissionOutcome::Unsupported
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvokeOptions {
    /// Kill the script if it runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
}

/// A script run that exited successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub script: PathBuf,
    /// Always `0`; a non-zero exit is returned as [`ReposError::ScriptFailed`].
    pub exit_code: i32,
    pub elapsed: Duration,
}

/// Run `script` with `args`, inheriting the standard streams, and wait for it.
///
/// # Errors
///
/// - [`ReposError::ScriptFailed`] with the exact code when the script exits non-zero
/// - [`ReposError::TimedOut`] when a deadline is set and passes
/// - [`ReposError::Spawn`] / [`ReposError::Wait`] for any other failure
pub fn invoke<S: AsRef<OsStr>>(
    script: &Path,
    args: &[S],
    options: &InvokeOptions,
) -> Result<ScriptOutcome> {
    let name = display_name(script);
    let _ = ensure_executable(script);

    tracing::debug!("running {} with {} argument(s)", script.display(), args.len());
    let started = Instant::now();

    let mut child = Command::new(script)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ReposError::Spawn {
            script: name.clone(),
            source,
        })?;

    let status = match options.timeout {
        Some(timeout) => wait_with_deadline(&mut child, timeout, &name)?,
        None => child.wait().map_err(|source| ReposError::Wait {
            script: name.clone(),
            source,
        })?,
    };

    let elapsed = started.elapsed();
    let exit_code = exit_code_of(status);
    tracing::debug!("{name} exited with {exit_code} after {}ms", elapsed.as_millis());

    if exit_code != 0 {
        return Err(ReposError::ScriptFailed {
            script: name,
            code: exit_code,
        });
    }

    Ok(ScriptOutcome {
        script: script.to_path_buf(),
        exit_code,
        elapsed,
    })
}

fn wait_with_deadline(child: &mut Child, timeout: Duration, name: &str) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        let polled = child.try_wait().map_err(|source| ReposError::Wait {
            script: name.to_string(),
            source,
        })?;
        if let Some(status) = polled {
            return Ok(status);
        }

        let now = Instant::now();
        if now >= deadline {
            tracing::warn!("{name} exceeded {}s, terminating", timeout.as_secs());
            let _ = child.kill();
            let _ = child.wait();
            return Err(ReposError::TimedOut {
                script: name.to_string(),
                timeout,
            });
        }
        std::thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Exit code of a finished child; a signal `n` maps to `128 + n` as in POSIX shells.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    crate::error::FAILURE_EXIT_CODE
}

fn display_name(script: &Path) -> String {
    script
        .file_name()
        .unwrap_or(script.as_os_str())
        .to_string_lossy()
        .into_owned()
}
