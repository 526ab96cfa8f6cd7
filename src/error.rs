use thiserror::Error;

use crate::parse::ParseError;
use crate::{BuildError, EvaluationError};

/// Unified error type covering parsing, construction, evaluation, and I/O.
///
/// Returned by convenience methods like
/// [`Rule::from_file()`](crate::Rule::from_file).
#[derive(Debug, Error)]
pub enum JsonRulesError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Evaluate(#[from] EvaluationError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
