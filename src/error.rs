use thiserror::Error;

use crate::field::StructError;
use crate::flagset::FlagError;

/// Top-level error type for flag binding.
///
/// `InvalidInput`, `BadStruct` and `TypeAssertion` are mistakes in the
/// program itself. `ParsingFailed`, `MissingArgument` and `HelpRequested`
/// come from the command line the user typed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("bad struct: {0}")]
    BadStruct(#[from] StructError),

    #[error("error asserting types for field '{field}': {reason}")]
    TypeAssertion { field: String, reason: String },

    #[error("error parsing flags: {0}")]
    ParsingFailed(#[source] FlagError),

    #[error("missing required flags: {}", flag_list(.names))]
    MissingArgument { names: Vec<String> },

    #[error("help requested")]
    HelpRequested,
}

impl Error {
    /// Whether the error was caused by command-line input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::ParsingFailed(_) | Error::MissingArgument { .. } | Error::HelpRequested
        )
    }

    /// Whether the error points at a malformed record or an internal fault.
    pub fn is_programmer_error(&self) -> bool {
        !self.is_user_error()
    }

    /// Process exit status used when exiting on error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::HelpRequested => 0,
            _ => 2,
        }
    }
}

impl From<FlagError> for Error {
    fn from(err: FlagError) -> Self {
        match err {
            FlagError::Help => Error::HelpRequested,
            other => Error::ParsingFailed(other),
        }
    }
}

fn flag_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("-{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let user = [
            Error::ParsingFailed(FlagError::Undefined("x".into())),
            Error::MissingArgument {
                names: vec!["x".into()],
            },
            Error::HelpRequested,
        ];
        for err in &user {
            assert!(err.is_user_error(), "{err}");
            assert!(!err.is_programmer_error(), "{err}");
        }

        let programmer = [
            Error::InvalidInput("i64".into()),
            Error::BadStruct(StructError::DuplicateName {
                field: "b".into(),
                name: "a".into(),
            }),
            Error::TypeAssertion {
                field: "a".into(),
                reason: "mismatch".into(),
            },
        ];
        for err in &programmer {
            assert!(err.is_programmer_error(), "{err}");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_help_exits_cleanly() {
        assert_eq!(Error::from(FlagError::Help).exit_code(), 0);
        assert!(matches!(Error::from(FlagError::Help), Error::HelpRequested));
    }

    #[test]
    fn test_missing_argument_lists_every_flag() {
        let err = Error::MissingArgument {
            names: vec!["zero".into(), "one".into()],
        };
        assert_eq!(err.to_string(), "missing required flags: -zero, -one");
    }

    #[test]
    fn test_parsing_failed_wraps_flag_error() {
        let err = Error::from(FlagError::Undefined("nope".into()));
        assert_eq!(
            err.to_string(),
            "error parsing flags: flag provided but not defined: -nope"
        );
    }
}
