use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::{EvaluationContext, EvaluationError, Expression};
use crate::parse::ParseError;
use crate::path::PathResolver;

/// A rule: one root [`Expression`] evaluated against JSON documents.
///
/// Immutable after construction. Thread-safe and designed to live behind
/// `Arc`; every [`matches`](Self::matches) call works on its own
/// [`EvaluationContext`].
///
/// # Example
///
/// ```
/// use jsonrules::{path, PreOperation, Rule};
/// use serde_json::json;
///
/// let rule = Rule::new(
///     path("$.email")
///         .preoperation(PreOperation::sub_str_after("@"))
///         .equals("example.com")
///         .unwrap(),
/// );
/// assert!(rule.matches(&json!({"email": "ann@example.com"})).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    root: Expression,
}

impl Rule {
    #[must_use]
    pub fn new(root: Expression) -> Self {
        Self { root }
    }

    /// Parse a rule from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] on malformed JSON, an unknown `"type"` or
    /// `"operation"` tag, or a configuration that fails validation.
    pub fn create(json: &str) -> Result<Self, ParseError> {
        let root = crate::parse::parse(json)?;
        tracing::debug!(
            root = %root.expression_type(),
            nodes = root.node_count(),
            "rule created"
        );
        Ok(Self { root })
    }

    /// Build a rule from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] under the same conditions as [`create`](Self::create).
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        crate::parse::parse_value(value).map(Self::new)
    }

    /// Read a file and parse the rule it contains.
    ///
    /// # Errors
    ///
    /// Returns [`JsonRulesError`](crate::JsonRulesError) on I/O or parse failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::JsonRulesError> {
        let input = std::fs::read_to_string(path)?;
        Ok(Self::create(&input)?)
    }

    #[must_use]
    pub fn root(&self) -> &Expression {
        &self.root
    }

    /// Evaluate the rule against `document` using the default JSONPath
    /// resolver.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] for any fault not absorbed by the node
    /// that raised it.
    pub fn matches(&self, document: &Value) -> Result<bool, EvaluationError> {
        self.evaluate_in(&EvaluationContext::new(document))
    }

    /// Evaluate with a caller-supplied path resolver.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] for any fault not absorbed by the node
    /// that raised it.
    pub fn matches_with(
        &self,
        document: &Value,
        resolver: &dyn PathResolver,
    ) -> Result<bool, EvaluationError> {
        self.evaluate_in(&EvaluationContext::with_resolver(document, resolver))
    }

    fn evaluate_in(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let result = self.root.evaluate(ctx);
        tracing::trace!(root = %self.root.expression_type(), ?result, "rule evaluated");
        result
    }

    /// Canonical JSON text of this rule.
    ///
    /// Repeated calls return identical bytes, and
    /// `Rule::create(&rule.representation())` rebuilds an equal rule.
    #[must_use]
    pub fn representation(&self) -> String {
        crate::serial::to_json(&self.root).to_string()
    }
}

impl From<Expression> for Rule {
    fn from(root: Expression) -> Self {
        Self::new(root)
    }
}

impl FromStr for Rule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::create(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.representation())
    }
}
