//! Library entry points: build argv, locate the script, run it.

use crate::config::Settings;
use crate::error::Result;
use crate::locator::ScriptLocator;
use crate::operation::Operation;
use crate::options::{RunOptions, SetupOptions};
use crate::process::{self, ScriptOutcome};
use std::ffi::OsStr;

/// Run `operation`'s script with a ready-made argv tail.
///
/// # Errors
///
/// Fails if the script cannot be located, exits non-zero, or cannot be run.
pub fn run_operation<S: AsRef<OsStr>>(
    settings: &Settings,
    operation: Operation,
    args: &[S],
) -> Result<ScriptOutcome> {
    let script = ScriptLocator::from_settings(settings).locate(operation.script_name())?;
    process::invoke(&script, args, &settings.invoke_options())
}

/// Clone and configure repositories.
///
/// ```no_run
/// use repos::options::SetupOptions;
///
/// let options = SetupOptions {
///     public: Some(true),
///     ..Default::default()
/// };
/// repos::setup(&options, &["--extra-flag"])?;
/// # Ok::<(), repos::ReposError>(())
/// ```
///
/// # Errors
///
/// See [`run_operation`].
pub fn setup<S: AsRef<OsStr>>(options: &SetupOptions, raw: &[S]) -> Result<ScriptOutcome> {
    setup_raw(&options.to_args(raw))
}

/// Run the setup script with arguments passed through untouched.
///
/// # Errors
///
/// See [`run_operation`].
pub fn setup_raw<S: AsRef<OsStr>>(args: &[S]) -> Result<ScriptOutcome> {
    run_operation(&Settings::from_env(), Operation::Setup, args)
}

/// Execute the pipeline script inside each repository.
///
/// # Errors
///
/// See [`run_operation`].
pub fn run<S: AsRef<OsStr>>(options: &RunOptions, raw: &[S]) -> Result<ScriptOutcome> {
    run_raw(&options.to_args(raw))
}

/// Run the pipeline script with arguments passed through untouched.
///
/// # Errors
///
/// See [`run_operation`].
pub fn run_raw<S: AsRef<OsStr>>(args: &[S]) -> Result<ScriptOutcome> {
    run_operation(&Settings::from_env(), Operation::Run, args)
}
