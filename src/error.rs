use thiserror::Error;

/// Errors produced while configuring or running a [`Trainer`](crate::trainer::Trainer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The configured policy name does not match any known strategy
    #[error("unknown policy `{0}`")]
    UnknownPolicy(String),

    /// No environment is registered under the given identifier
    #[error("unknown environment `{0}`")]
    UnknownEnvironment(String),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid decay parameters: {0}")]
    InvalidDecay(&'static str),

    /// Sampled from a memory that holds no elements
    #[error("cannot sample from an empty memory")]
    EmptyMemory,

    /// A policy was asked to choose between zero actions
    #[error("no action values to choose from")]
    NoActions,

    /// A policy was given action values containing `NaN`
    #[error("action values contain NaN")]
    NanValues,

    #[error("missing extra config value `{0}`")]
    MissingExtra(String),

    #[error("extra config value `{key}` is not a {expected}")]
    ExtraType { key: String, expected: &'static str },

    /// Failure reported by an environment implementation
    #[error("environment error: {0}")]
    Environment(String),
}

pub type Result<T> = std::result::Result<T, Error>;
