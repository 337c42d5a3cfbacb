//! Error types.

use std::path::PathBuf;

use crate::field::{Field, ValueKind};

/// Banner text used when the registration endpoint breaks its contract.
pub const GENERIC_FAILURE_MESSAGE: &str = "registration failed, please try again";

/// A field value that violates one of the field's rules.
///
/// Displayed inline next to the field; never escalated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Input that cannot be applied to the form at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown form field `{0}`")]
    Unknown(String),
    #[error("field `{field}` expects a {expected} value")]
    TypeMismatch { field: Field, expected: ValueKind },
}

/// Failure reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The endpoint answered with an error and a message for the user.
    #[error("registration rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The endpoint answered with an error but no usable message.
    #[error("registration endpoint returned status {status} without a message")]
    MissingMessage { status: u16 },
    /// No response was received.
    #[error("registration request failed: {0}")]
    Transport(String),
}

impl SubmissionError {
    /// Text to show in the failure banner.
    pub fn user_message(&self) -> &str {
        match self {
            SubmissionError::Rejected { message, .. } => message,
            SubmissionError::MissingMessage { .. } | SubmissionError::Transport(_) => {
                GENERIC_FAILURE_MESSAGE
            }
        }
    }

    /// Whether the endpoint honored its failure contract.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, SubmissionError::Rejected { .. })
    }
}

/// Errors raised while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[cfg(feature = "http")]
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
