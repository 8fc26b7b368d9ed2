//! # repos
//!
//! Keyword-style bindings for the repos automation scripts: `setup-repos.sh`
//! clones and configures a set of related repositories, `run-pipeline.sh`
//! executes a script inside each of them.
//!
//! Named options are turned into a deterministic argv, the script is located
//! on disk, and it runs as a child process whose exit code is passed back.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod inspect;
pub mod locator;
pub mod logging;
pub mod operation;
pub mod options;
pub mod process;

pub use error::{ReposError, Result};
pub use executor::{run, run_raw, setup, setup_raw};
pub use locator::locate;
pub use operation::Operation;
pub use options::{FlagValue, Permissions, RunOptions, SetupOptions};
pub use process::ScriptOutcome;
