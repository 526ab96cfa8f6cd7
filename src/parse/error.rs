use thiserror::Error;

use crate::BuildError;

/// Errors produced when turning rule JSON into an expression tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed rule json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown expression type '{tag}'")]
    UnknownExpressionType { tag: String },

    #[error("unknown pre-operation '{tag}'")]
    UnknownPreOperation { tag: String },

    #[error("invalid rule: {0}")]
    Build(#[from] BuildError),
}
