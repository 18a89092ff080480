use thiserror::Error;

use super::Kind;

/// A record whose annotations cannot be turned into flags.
///
/// These are mistakes in the program's own record definition, never in
/// the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StructError {
    #[error("field '{field}': default {value:?} is not a valid {kind}")]
    InvalidDefault {
        field: String,
        kind: Kind,
        value: String,
    },

    #[error("field '{field}': required {value:?} is not a boolean")]
    InvalidRequired { field: String, value: String },

    #[error("field '{field}': {name:?} is not a usable flag name")]
    InvalidName { field: String, name: String },

    #[error("field '{field}': flag -{name} is already defined by another field")]
    DuplicateName { field: String, name: String },

    #[error("field '{field}': value cannot be serialized: {reason}")]
    Unrepresentable { field: String, reason: String },
}
