//! Script discovery.
//!
//! A [`ScriptLocator`] tries an ordered chain of [`ScriptSource`]s and returns
//! the first candidate that is an existing regular file:
//!
//! 1. `$REPOS_SCRIPTS_DIR/<name>`, when the variable is set
//! 2. next to the installed binary: `<exe dir>/scripts/<name>`, then
//!    `<exe dir>/../share/repos/scripts/<name>`
//! 3. the source checkout: `<crate dir>/scripts/<name>`

use crate::config::Settings;
use crate::error::{ReposError, Result};
use std::path::{Path, PathBuf};

/// Subdirectory holding the scripts in both installed and checkout layouts.
pub const SCRIPTS_SUBDIR: &str = "scripts";

/// Result of asking one source for a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(PathBuf),
    /// Not found; carries the paths that were checked.
    Missing(Vec<PathBuf>),
}

/// One strategy for finding a script by file name.
pub trait ScriptSource {
    /// Short label used in logs.
    fn label(&self) -> &'static str;

    /// Paths to check, most preferred first.
    fn candidates(&self, script_name: &str) -> Vec<PathBuf>;

    fn lookup(&self, script_name: &str) -> Lookup {
        let candidates = self.candidates(script_name);
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Lookup::Found(path.clone()),
            None => Lookup::Missing(candidates),
        }
    }
}

/// Scripts in an explicit directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ScriptSource for DirectorySource {
    fn label(&self) -> &'static str {
        "directory"
    }

    fn candidates(&self, script_name: &str) -> Vec<PathBuf> {
        vec![self.dir.join(script_name)]
    }
}

/// Scripts installed alongside the running executable.
#[derive(Debug, Clone, Default)]
pub struct InstalledSource;

impl ScriptSource for InstalledSource {
    fn label(&self) -> &'static str {
        "installed"
    }

    fn candidates(&self, script_name: &str) -> Vec<PathBuf> {
        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                tracing::debug!("cannot resolve current executable: {e}");
                return Vec::new();
            }
        };
        let Some(exe_dir) = exe.parent() else {
            return Vec::new();
        };
        let mut candidates = vec![exe_dir.join(SCRIPTS_SUBDIR).join(script_name)];
        if let Some(prefix) = exe_dir.parent() {
            candidates.push(
                prefix
                    .join("share")
                    .join(env!("CARGO_PKG_NAME"))
                    .join(SCRIPTS_SUBDIR)
                    .join(script_name),
            );
        }
        candidates
    }
}

/// Scripts in the crate's own source tree, for running from a checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSource {
    root: PathBuf,
}

impl Default for CheckoutSource {
    fn default() -> Self {
        Self {
            root: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        }
    }
}

impl ScriptSource for CheckoutSource {
    fn label(&self) -> &'static str {
        "checkout"
    }

    fn candidates(&self, script_name: &str) -> Vec<PathBuf> {
        vec![self.root.join(SCRIPTS_SUBDIR).join(script_name)]
    }
}

/// Ordered chain of script sources.
pub struct ScriptLocator {
    sources: Vec<Box<dyn ScriptSource>>,
}

impl ScriptLocator {
    #[must_use]
    pub fn new(sources: Vec<Box<dyn ScriptSource>>) -> Self {
        Self { sources }
    }

    /// The standard chain, preceded by the configured scripts directory if any.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut sources: Vec<Box<dyn ScriptSource>> = Vec::new();
        if let Some(dir) = &settings.scripts_dir {
            sources.push(Box::new(DirectorySource::new(dir)));
        }
        sources.push(Box::new(InstalledSource));
        sources.push(Box::new(CheckoutSource::default()));
        Self::new(sources)
    }

    /// Resolve `script_name` to the path of an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns [`ReposError::NotFound`] if the name is empty or no source has the file.
    pub fn locate(&self, script_name: &str) -> Result<PathBuf> {
        let mut searched = Vec::new();
        if is_plain_file_name(script_name) {
            for source in &self.sources {
                match source.lookup(script_name) {
                    Lookup::Found(path) => {
                        tracing::debug!(
                            "found {script_name} via {} source at {}",
                            source.label(),
                            path.display()
                        );
                        return Ok(path);
                    }
                    Lookup::Missing(paths) => {
                        tracing::trace!(
                            "{script_name} not in {} source ({} candidates)",
                            source.label(),
                            paths.len()
                        );
                        searched.extend(paths);
                    }
                }
            }
        }
        Err(ReposError::NotFound {
            name: script_name.to_string(),
            searched,
        })
    }
}

/// Locate a script using the settings from the environment.
///
/// # Errors
///
/// Returns [`ReposError::NotFound`] if no source has the file.
pub fn locate(script_name: &str) -> Result<PathBuf> {
    ScriptLocator::from_settings(&Settings::from_env()).locate(script_name)
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name().is_some_and(|f| f == name)
}
