//! Named options for each operation and their conversion into argv tokens.
//!
//! Every operation owns a fixed, ordered table of [`OptionSpec`]s. The typed
//! option structs emit their tokens in table order, so the same values always
//! produce the same argv.

use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// How a named option turns into argv tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// `flag` when true, nothing otherwise.
    Switch,
    /// `flag value`.
    Value,
    /// `flag v1 flag v2 ...`, one pair per element.
    Repeated,
    /// `flag v1,v2,...`, a single comma-joined value.
    Joined,
    /// `flag` alone, or `flag value`.
    OptionalValue,
}

/// One entry of an operation's option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub name: &'static str,
    pub flag: &'static str,
    pub arity: Arity,
}

impl OptionSpec {
    const fn new(name: &'static str, flag: &'static str, arity: Arity) -> Self {
        Self { name, flag, arity }
    }
}

/// Flags understood by `setup-repos.sh`.
pub mod setup {
    use super::{Arity, OptionSpec};

    pub const FILE: OptionSpec = OptionSpec::new("file", "-f", Arity::Value);
    pub const PUBLIC: OptionSpec = OptionSpec::new("public", "--public", Arity::Switch);
    pub const CODESPACES: OptionSpec = OptionSpec::new("codespaces", "--codespaces", Arity::Switch);
    pub const DEVCONTAINER: OptionSpec = OptionSpec::new("devcontainer", "-d", Arity::Repeated);
    pub const PERMISSIONS: OptionSpec =
        OptionSpec::new("permissions", "--permissions", Arity::Value);
    pub const TOOL: OptionSpec = OptionSpec::new("tool", "-t", Arity::Value);
    pub const DEBUG: OptionSpec = OptionSpec::new("debug", "--debug", Arity::Switch);
    pub const DEBUG_FILE: OptionSpec =
        OptionSpec::new("debug_file", "--debug-file", Arity::OptionalValue);

    /// Emission order for [`SetupOptions`](super::SetupOptions).
    pub static OPTIONS: &[OptionSpec] = &[
        FILE,
        PUBLIC,
        CODESPACES,
        DEVCONTAINER,
        PERMISSIONS,
        TOOL,
        DEBUG,
        DEBUG_FILE,
    ];
}

/// Flags understood by `run-pipeline.sh`.
///
/// `-d` here skips dependency installation; it is unrelated to the setup
/// devcontainer flag of the same spelling.
pub mod run {
    use super::{Arity, OptionSpec};

    pub const FILE: OptionSpec = OptionSpec::new("file", "-f", Arity::Value);
    pub const SCRIPT: OptionSpec = OptionSpec::new("script", "--script", Arity::Value);
    pub const INCLUDE: OptionSpec = OptionSpec::new("include", "-i", Arity::Joined);
    pub const EXCLUDE: OptionSpec = OptionSpec::new("exclude", "-e", Arity::Joined);
    pub const ENSURE_SETUP: OptionSpec =
        OptionSpec::new("ensure_setup", "--ensure-setup", Arity::Switch);
    pub const SKIP_DEPS: OptionSpec = OptionSpec::new("skip_deps", "-d", Arity::Switch);
    pub const DRY_RUN: OptionSpec = OptionSpec::new("dry_run", "-n", Arity::Switch);
    pub const VERBOSE: OptionSpec = OptionSpec::new("verbose", "-v", Arity::Switch);
    pub const CONTINUE_ON_ERROR: OptionSpec =
        OptionSpec::new("continue_on_error", "--continue-on-error", Arity::Switch);

    /// Emission order for [`RunOptions`](super::RunOptions).
    pub static OPTIONS: &[OptionSpec] = &[
        FILE,
        SCRIPT,
        INCLUDE,
        EXCLUDE,
        ENSURE_SETUP,
        SKIP_DEPS,
        DRY_RUN,
        VERBOSE,
        CONTINUE_ON_ERROR,
    ];
}

/// A flag that is either bare or carries an explicit value, e.g. `--debug-file [path]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Enabled,
    Value(OsString),
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::Value(value.into())
    }
}

impl From<PathBuf> for FlagValue {
    fn from(value: PathBuf) -> Self {
        Self::Value(value.into_os_string())
    }
}

/// Access level requested by `setup --permissions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permissions {
    All,
    Contents,
}

impl Permissions {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Contents => "contents",
        }
    }
}

/// Accumulates argv tokens from option values.
///
/// Tokens are kept as `OsString` so paths reach the script byte for byte.
/// Unset values (`None`, `Some(false)`, empty lists) emit nothing.
#[derive(Debug, Default)]
pub struct ArgvBuilder {
    args: Vec<OsString>,
}

impl ArgvBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch(&mut self, spec: &OptionSpec, value: Option<bool>) -> &mut Self {
        debug_assert_eq!(spec.arity, Arity::Switch, "{} is not a switch", spec.name);
        if value == Some(true) {
            self.args.push(spec.flag.into());
        }
        self
    }

    pub fn value<V: AsRef<OsStr>>(&mut self, spec: &OptionSpec, value: Option<V>) -> &mut Self {
        debug_assert_eq!(spec.arity, Arity::Value, "{} takes no value", spec.name);
        if let Some(value) = value {
            self.args.push(spec.flag.into());
            self.args.push(value.as_ref().to_os_string());
        }
        self
    }

    /// Emit a list using the option's convention: [`Arity::Repeated`] or [`Arity::Joined`].
    pub fn list<S: AsRef<OsStr>>(&mut self, spec: &OptionSpec, values: &[S]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        match spec.arity {
            Arity::Joined => {
                let mut joined = OsString::new();
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        joined.push(",");
                    }
                    joined.push(value);
                }
                self.args.push(spec.flag.into());
                self.args.push(joined);
            }
            Arity::Repeated => {
                for value in values {
                    self.args.push(spec.flag.into());
                    self.args.push(value.as_ref().to_os_string());
                }
            }
            _ => debug_assert!(false, "{} is not a list option", spec.name),
        }
        self
    }

    pub fn optional_value(&mut self, spec: &OptionSpec, value: Option<&FlagValue>) -> &mut Self {
        debug_assert_eq!(spec.arity, Arity::OptionalValue);
        match value {
            Some(FlagValue::Enabled) => self.args.push(spec.flag.into()),
            Some(FlagValue::Value(value)) => {
                self.args.push(spec.flag.into());
                self.args.push(value.clone());
            }
            None => {}
        }
        self
    }

    /// Append pass-through arguments verbatim.
    pub fn raw<S: AsRef<OsStr>>(&mut self, raw: &[S]) -> &mut Self {
        self.args.extend(raw.iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn finish(&mut self) -> Vec<OsString> {
        std::mem::take(&mut self.args)
    }
}

/// Options for `setup-repos.sh`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupOptions {
    /// Repository-list file (`-f`).
    pub file: Option<PathBuf>,
    pub public: Option<bool>,
    pub codespaces: Option<bool>,
    /// Devcontainer descriptors, one `-d` per path.
    pub devcontainer: Vec<PathBuf>,
    pub permissions: Option<Permissions>,
    pub tool: Option<String>,
    pub debug: Option<bool>,
    pub debug_file: Option<FlagValue>,
}

impl SetupOptions {
    /// Build the argv tail: named options in table order, then `raw` verbatim.
    #[must_use]
    pub fn to_args<S: AsRef<OsStr>>(&self, raw: &[S]) -> Vec<OsString> {
        ArgvBuilder::new()
            .value(&setup::FILE, self.file.as_deref())
            .switch(&setup::PUBLIC, self.public)
            .switch(&setup::CODESPACES, self.codespaces)
            .list(&setup::DEVCONTAINER, &self.devcontainer)
            .value(&setup::PERMISSIONS, self.permissions.map(Permissions::as_str))
            .value(&setup::TOOL, self.tool.as_deref())
            .switch(&setup::DEBUG, self.debug)
            .optional_value(&setup::DEBUG_FILE, self.debug_file.as_ref())
            .raw(raw)
            .finish()
    }
}

/// Options for `run-pipeline.sh`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Repository-list file (`-f`).
    pub file: Option<PathBuf>,
    /// Script executed inside each repository.
    pub script: Option<PathBuf>,
    /// Repositories to include; sent as one comma-joined value.
    pub include: Vec<String>,
    /// Repositories to exclude; sent as one comma-joined value.
    pub exclude: Vec<String>,
    pub ensure_setup: Option<bool>,
    pub skip_deps: Option<bool>,
    pub dry_run: Option<bool>,
    pub verbose: Option<bool>,
    pub continue_on_error: Option<bool>,
}

impl RunOptions {
    /// Build the argv tail: named options in table order, then `raw` verbatim.
    #[must_use]
    pub fn to_args<S: AsRef<OsStr>>(&self, raw: &[S]) -> Vec<OsString> {
        ArgvBuilder::new()
            .value(&run::FILE, self.file.as_deref())
            .value(&run::SCRIPT, self.script.as_deref())
            .list(&run::INCLUDE, &self.include)
            .list(&run::EXCLUDE, &self.exclude)
            .switch(&run::ENSURE_SETUP, self.ensure_setup)
            .switch(&run::SKIP_DEPS, self.skip_deps)
            .switch(&run::DRY_RUN, self.dry_run)
            .switch(&run::VERBOSE, self.verbose)
            .switch(&run::CONTINUE_ON_ERROR, self.continue_on_error)
            .raw(raw)
            .finish()
    }
}
