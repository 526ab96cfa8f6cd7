use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use super::EvaluationError;
use crate::path::{JsonPathResolver, PathResolver};

/// Wraps the document for the duration of one evaluation.
///
/// Created fresh by every [`Rule::matches`](crate::Rule::matches) call and
/// never reused across documents.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    document: &'a Value,
    resolver: &'a dyn PathResolver,
}

impl<'a> EvaluationContext<'a> {
    /// Context using the default [`JsonPathResolver`].
    #[must_use]
    pub fn new(document: &'a Value) -> Self {
        Self::with_resolver(document, &JsonPathResolver)
    }

    #[must_use]
    pub fn with_resolver(document: &'a Value, resolver: &'a dyn PathResolver) -> Self {
        Self { document, resolver }
    }

    /// The root document.
    #[must_use]
    pub fn document(&self) -> &'a Value {
        self.document
    }

    /// Resolve `path` against the root document.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's failure unchanged.
    pub fn resolve(&self, path: &str) -> Result<Cow<'a, Value>, EvaluationError> {
        self.resolver.resolve(self.document, path)
    }
}

impl fmt::Debug for EvaluationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("document", self.document)
            .finish_non_exhaustive()
    }
}
