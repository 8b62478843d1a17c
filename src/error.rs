// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Maps domain errors to specific exit codes for shell scripting

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Malformed response in {context}: {message}")]
    MalformedResponse { context: String, message: String },

    #[error("Unresolved reference {id} in children of {context}")]
    MissingReference { id: String, context: String },

    #[error("Unknown node type {kind:?} on record {id}")]
    UnknownNodeType { id: String, kind: String },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth(_) => 2,
            Error::Network(_) => 3,
            Error::Api { .. } => 4,
            Error::Parse(_) => 5,
            Error::Filesystem(_) => 6,
            Error::MalformedResponse { .. } => 7,
            Error::MissingReference { .. } => 8,
            Error::UnknownNodeType { .. } => 9,
            Error::DestinationExists { .. } => 10,
        }
    }

    pub(crate) fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedResponse {
            context: context.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
