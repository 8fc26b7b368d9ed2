//! # repos
//!
//! Multi-repository management from the command line.
//!
//! ## Usage
//!
//! - Clone and configure: `repos setup -f repos.list --public`
//! - Run a script in every repository: `repos run --script build.sh -i api,web`
//! - Describe the option tables: `repos --inspect`
//!
//! Flags after the subcommand go to the underlying script unchanged.

/// Entry point for the CLI tool.
fn main() {
    repos::cli::run_cli();
}
