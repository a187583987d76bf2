use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a failed generative-model call.
///
/// Users only ever see one fallback reply for all of these; the kind exists so
/// the logs can tell a dead network from an exhausted quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelErrorKind {
    /// The request never produced an HTTP response.
    Transport,
    /// 401 / 403 from the model API.
    Auth,
    /// 429 from the model API.
    Quota,
    /// Any other non-success status.
    Api,
    /// A success status whose body could not be decoded.
    Malformed,
}

impl fmt::Display for ModelErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Auth => "auth",
            Self::Quota => "quota",
            Self::Api => "api",
            Self::Malformed => "malformed",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Model error ({kind}): {message}")]
    Model {
        kind: ModelErrorKind,
        message: String,
    },

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn model(kind: ModelErrorKind, msg: impl Into<String>) -> Self {
        Self::Model {
            kind,
            message: msg.into(),
        }
    }

    pub fn messaging(msg: impl Into<String>) -> Self {
        Self::Messaging(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the model failure kind when this is a model error.
    pub fn model_kind(&self) -> Option<ModelErrorKind> {
        match self {
            Self::Model { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
