use thiserror::Error;

use super::{ExpressionType, PreOperationType};

/// Errors raised while constructing an [`Expression`](super::Expression).
///
/// All structural validation happens here, so a tree that was built
/// successfully never fails for configuration reasons during evaluation.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("expression '{expression}' does not accept a pre-operation")]
    PreOperationNotSupported { expression: ExpressionType },

    #[error("expression '{expression}' requires at least one child")]
    EmptyChildren { expression: ExpressionType },

    #[error("expression '{expression}' requires exactly one child, got {count}")]
    ChildCount {
        expression: ExpressionType,
        count: usize,
    },

    #[error("expression '{expression}' requires field '{field}'")]
    MissingField {
        expression: ExpressionType,
        field: &'static str,
    },

    #[error("expression '{expression}' has an invalid value for '{field}': {reason}")]
    InvalidField {
        expression: ExpressionType,
        field: &'static str,
        reason: String,
    },

    #[error("expression '{expression}' nests {nesting} levels deep, the limit is {limit}")]
    TooDeep {
        expression: ExpressionType,
        nesting: usize,
        limit: usize,
    },

    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Faults raised while evaluating an expression against a document.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("path '{path}' did not resolve: {reason}")]
    PathNotFound { path: String, reason: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("operation '{operation}' is not supported for {found} values")]
    UnsupportedOperation {
        operation: PreOperationType,
        found: &'static str,
    },

    #[error("operation '{operation}' failed: {reason}")]
    TransformFailed {
        operation: PreOperationType,
        reason: String,
    },
}

impl EvaluationError {
    /// Whether this fault is a path-resolution miss, the only kind an
    /// expression's `defaultResult` may absorb.
    #[must_use]
    pub fn is_path_failure(&self) -> bool {
        matches!(self, EvaluationError::PathNotFound { .. })
    }
}
