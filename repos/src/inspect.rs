//! Machine-readable description of the operations and their options.

use crate::operation::Operation;
use crate::options::OptionSpec;
use serde::Serialize;

/// One operation as reported by `repos --inspect`.
#[derive(Debug, Serialize)]
pub struct OperationSchema {
    pub name: Operation,
    pub script: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionSpec],
}

/// Root structure for inspect output
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub version: &'static str,
    pub operations: Vec<OperationSchema>,
}

#[must_use]
pub fn inspect() -> InspectOutput {
    InspectOutput {
        version: env!("CARGO_PKG_VERSION"),
        operations: Operation::ALL
            .into_iter()
            .map(|op| OperationSchema {
                name: op,
                script: op.script_name(),
                description: op.description(),
                options: op.options(),
            })
            .collect(),
    }
}

/// Render [`inspect`] as pretty-printed JSON.
///
/// # Errors
///
/// Returns the serializer error, which only happens on a broken `Serialize` impl.
pub fn render_inspect() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&inspect())
}
