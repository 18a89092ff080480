use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FlagError {
    #[error("flag redefined: {0}")]
    Redefined(String),

    #[error("flag name {0:?} must not be empty, start with '-' or contain '='")]
    InvalidName(String),

    #[error("flag provided but not defined: -{0}")]
    Undefined(String),

    #[error("bad flag syntax: {0}")]
    BadSyntax(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("invalid value {value:?} for flag -{name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("flag: help requested")]
    Help,
}
