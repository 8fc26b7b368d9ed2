//! The fixed table of operations and the scripts they delegate to.

use crate::options::{self, OptionSpec};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Setup,
    Run,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Setup, Operation::Run];

    /// Subcommand name on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Run => "run",
        }
    }

    /// File name of the external script, relative to the scripts directory.
    #[must_use]
    pub fn script_name(self) -> &'static str {
        match self {
            Self::Setup => "setup-repos.sh",
            Self::Run => "run-pipeline.sh",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Setup => "Clone and configure repositories from a repos.list file",
            Self::Run => "Execute a script inside each cloned repository",
        }
    }

    /// Named options this operation's script understands, in emission order.
    #[must_use]
    pub fn options(self) -> &'static [OptionSpec] {
        match self {
            Self::Setup => options::setup::OPTIONS,
            Self::Run => options::run::OPTIONS,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}
