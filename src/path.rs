//! Path-query seam.
//!
//! The engine never interprets path strings itself. Every lookup goes
//! through a [`PathResolver`]; [`JsonPathResolver`] is the default binding
//! to RFC 9535 JSONPath.

use std::borrow::Cow;

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::EvaluationError;

/// Resolves a path string against a document.
///
/// Implementations must be stateless with respect to documents: the same
/// resolver is shared by concurrent evaluations.
pub trait PathResolver: Send + Sync {
    /// Return the node addressed by `path`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::PathNotFound`] when nothing matches, and
    /// [`EvaluationError::InvalidPath`] when `path` is not a valid query.
    fn resolve<'a>(&self, document: &'a Value, path: &str)
        -> Result<Cow<'a, Value>, EvaluationError>;
}

/// JSONPath resolver backed by `serde_json_path`.
///
/// A query matching one node yields that node. A query matching several
/// nodes (wildcards, slices, filters) yields an array of them in document
/// order. A query matching nothing is a resolution failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathResolver;

impl PathResolver for JsonPathResolver {
    fn resolve<'a>(
        &self,
        document: &'a Value,
        path: &str,
    ) -> Result<Cow<'a, Value>, EvaluationError> {
        let query = JsonPath::parse(path).map_err(|e| EvaluationError::InvalidPath {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        let mut nodes = query.query(document).all();
        match nodes.len() {
            0 => Err(EvaluationError::PathNotFound {
                path: path.to_owned(),
                reason: "no node matched".to_owned(),
            }),
            1 => Ok(Cow::Borrowed(nodes.remove(0))),
            _ => Ok(Cow::Owned(Value::Array(
                nodes.into_iter().cloned().collect(),
            ))),
        }
    }
}
