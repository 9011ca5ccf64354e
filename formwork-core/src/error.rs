//! Error types for formwork-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::FieldId;

/// Configuration errors raised while building or addressing a form.
///
/// User-input problems are never reported through this type; they live in
/// each field's error string.
#[derive(Debug, Error)]
pub enum FormError {
    /// Two descriptors in the same form share an id.
    #[error("duplicate field id '{0}'")]
    DuplicateField(FieldId),

    /// A linked rule names a field that was not declared before it.
    #[error("field '{field}' is linked to '{target}', which is not declared before it")]
    UnresolvedLink { field: FieldId, target: FieldId },

    /// An operation addressed a field id the form does not contain.
    #[error("unknown field '{0}'")]
    UnknownField(FieldId),

    /// Underlying I/O failure while reading a form definition.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error on load, with file path and line context from serde_yaml.
    #[error("failed to parse form definition at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML parse error for an in-memory definition.
    #[error("invalid form definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The definition file did not exist at the expected path.
    #[error("form definition not found at {path}")]
    DefinitionNotFound { path: PathBuf },
}

/// Outcome of a submission where at least one field failed validation.
///
/// Carries no error list: the refreshed per-field errors on the form are the
/// only failure channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("form has invalid fields")]
pub struct ValidationFailure;
