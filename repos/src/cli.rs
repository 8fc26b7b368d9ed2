//! CLI module containing the main entry point logic.
//!
//! The first argument picks the operation and everything after it is
//! forwarded to the script byte for byte, so `repos setup --help` and
//! `repos setup -- x` reach `setup-repos.sh` untouched. clap only parses
//! the top-level flags.

use crate::config::Settings;
use crate::error::{FAILURE_EXIT_CODE, ReposError};
use crate::operation::Operation;
use crate::{executor, inspect, logging};
use clap::Parser as ClapParser;
use clap::error::{ContextKind, ErrorKind};
use std::ffi::{OsStr, OsString};

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: repos <command> [options]

Commands:
  setup    Clone and configure repositories from a repos.list file
  run      Execute a script inside each cloned repository

Run 'repos <command> --help' for more information on a command.
";

/// Top-level flags of the repos tool. Subcommands are routed before clap runs.
#[derive(ClapParser, Debug)]
#[command(name = "repos")]
#[command(version = PKG_VERSION)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Describe both operations and their options as JSON
    #[arg(long)]
    inspect: bool,
}

/// Main CLI logic: initialise logging, dispatch, exit with the resulting code.
pub fn run_cli() -> ! {
    logging::init();
    let code = dispatch(std::env::args_os());
    std::process::exit(code);
}

/// Dispatch a full argv (program name first) and return the process exit code.
pub fn dispatch<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    dispatch_with(&Settings::from_env(), args)
}

/// [`dispatch`] with explicit settings.
pub fn dispatch_with<I, T>(settings: &Settings, args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let Some(first) = args.get(1) else {
        eprint!("{USAGE}");
        return FAILURE_EXIT_CODE;
    };

    if first == "-h" || first == "--help" {
        print!("{USAGE}");
        return 0;
    }

    if let Some(operation) = first.to_str().and_then(Operation::from_name) {
        return run_operation(settings, operation, &args[2..]);
    }

    match Cli::try_parse_from(&args) {
        Ok(cli) if cli.inspect => print_inspect(),
        Ok(_) => unknown_command(&first.to_string_lossy()),
        Err(err) => parse_failure(&err, first),
    }
}

fn run_operation(settings: &Settings, operation: Operation, script_args: &[OsString]) -> i32 {
    match executor::run_operation(settings, operation, script_args) {
        Ok(outcome) => {
            tracing::debug!(
                "{} finished in {}ms",
                operation.name(),
                outcome.elapsed.as_millis()
            );
            0
        }
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    }
}

fn parse_failure(err: &clap::Error, first: &OsStr) -> i32 {
    if err.kind() == ErrorKind::DisplayVersion {
        println!("repos {PKG_VERSION}");
        return 0;
    }

    let offending = err
        .get(ContextKind::InvalidArg)
        .map_or_else(|| first.to_string_lossy().into_owned(), ToString::to_string);
    unknown_command(&offending)
}

fn unknown_command(offending: &str) -> i32 {
    eprintln!("Error: unknown command '{offending}'\n");
    eprint!("{USAGE}");
    FAILURE_EXIT_CODE
}

fn print_inspect() -> i32 {
    match inspect::render_inspect() {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("Unexpected error: {e}");
            FAILURE_EXIT_CODE
        }
    }
}

/// A failing script has already spoken on its own stderr; everything else is printed here.
fn report(err: &ReposError) {
    match err {
        ReposError::ScriptFailed { .. } => tracing::debug!("{err}"),
        _ if err.is_unexpected() => eprintln!("Unexpected error: {err}"),
        _ => eprintln!("Error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_settings() -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            scripts_dir: Some(dir.path().to_path_buf()),
            timeout: None,
        };
        (dir, settings)
    }

    #[test]
    fn test_no_arguments_exits_one() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos"]), 1);
    }

    #[test]
    fn test_help_exits_zero() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos", "--help"]), 0);
        assert_eq!(dispatch_with(&settings, ["repos", "-h"]), 0);
    }

    #[test]
    fn test_leading_help_wins_over_trailing_arguments() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos", "-h", "foo"]), 0);
        assert_eq!(dispatch_with(&settings, ["repos", "--help", "setup"]), 0);
    }

    #[test]
    fn test_version_exits_zero() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos", "--version"]), 0);
    }

    #[test]
    fn test_unknown_command_exits_one() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos", "foo"]), 1);
        assert_eq!(dispatch_with(&settings, ["repos", "--bogus"]), 1);
        assert_eq!(dispatch_with(&settings, ["repos", "--inspect", "foo"]), 1);
    }

    #[test]
    fn test_missing_script_exits_one() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos", "setup", "--public"]), 1);
    }

    #[test]
    fn test_inspect_exits_zero() {
        let (_dir, settings) = empty_settings();
        assert_eq!(dispatch_with(&settings, ["repos", "--inspect"]), 0);
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_script_exit_code_passes_through() {
        let (dir, settings) = empty_settings();
        std::fs::write(dir.path().join("run-pipeline.sh"), "#!/bin/sh\nexit 7\n").unwrap();

        assert_eq!(dispatch_with(&settings, ["repos", "run", "-n"]), 7);
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_successful_script_exits_zero() {
        let (dir, settings) = empty_settings();
        std::fs::write(dir.path().join("setup-repos.sh"), "#!/bin/sh\nexit 0\n").unwrap();

        assert_eq!(dispatch_with(&settings, ["repos", "setup"]), 0);
    }

    #[cfg(unix)]
    fn recording_script(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let out = dir.join(format!("{name}.args"));
        let body = format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\n", out.display());
        std::fs::write(dir.join(name), body).unwrap();
        out
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_arguments_after_operation_are_forwarded_verbatim() {
        let (dir, settings) = empty_settings();
        let out = recording_script(dir.path(), "run-pipeline.sh");

        let code = dispatch_with(&settings, ["repos", "run", "--", "-v", "--inspect", "-h"]);
        assert_eq!(code, 0);
        let recorded = std::fs::read_to_string(out).unwrap();
        assert_eq!(recorded, "--\n-v\n--inspect\n-h\n");
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_non_utf8_arguments_reach_the_script() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (dir, settings) = empty_settings();
        let out = recording_script(dir.path(), "setup-repos.sh");
        let odd = OsStr::from_bytes(b"r\xffpos.list");

        let args = [OsStr::new("repos"), OsStr::new("setup"), OsStr::new("-f"), odd];
        assert_eq!(dispatch_with(&settings, args), 0);
        let recorded = std::fs::read(out).unwrap();
        assert_eq!(recorded, b"-f\nr\xffpos.list\n");
    }
}
