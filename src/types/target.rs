use std::borrow::Cow;

use serde_json::Value;

use super::collection::{CollectionExpression, ValueSource};
use super::equality::{EqualityExpression, Operand};
use super::existence::ExistenceExpression;
use super::numeric::{NumericBound, NumericExpression};
use super::presence::PresenceExpression;
use super::string_match::StringMatchExpression;
use super::{BuildError, EvaluationContext, EvaluationError, Expression, ExpressionType, PreOperation};

/// The subject configuration shared by every path-bearing expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTarget {
    path: String,
    default_result: Option<bool>,
    preoperation: Option<PreOperation>,
}

/// Outcome of resolving a path under an expression's absorption policy.
pub(crate) enum Resolved<'a> {
    Node(Cow<'a, Value>),
    Absorbed(bool),
}

impl PathTarget {
    /// Path locating the subject node.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Result used when a path fails to resolve. `None` means the failure
    /// is propagated to the caller.
    #[must_use]
    pub fn default_result(&self) -> Option<bool> {
        self.default_result
    }

    #[must_use]
    pub fn preoperation(&self) -> Option<&PreOperation> {
        self.preoperation.as_ref()
    }

    /// Resolve `path`, absorbing a resolution miss into the default result.
    pub(crate) fn resolve_path<'a>(
        &self,
        ctx: &EvaluationContext<'a>,
        path: &str,
    ) -> Result<Resolved<'a>, EvaluationError> {
        match ctx.resolve(path) {
            Ok(node) => Ok(Resolved::Node(node)),
            Err(err) if err.is_path_failure() => match self.default_result {
                Some(result) => {
                    tracing::debug!(path, result, "path did not resolve, using default result");
                    Ok(Resolved::Absorbed(result))
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    /// Resolve the subject node and run the pre-operation over it.
    pub(crate) fn resolve_subject<'a>(
        &self,
        ctx: &EvaluationContext<'a>,
    ) -> Result<Resolved<'a>, EvaluationError> {
        let node = match self.resolve_path(ctx, &self.path)? {
            Resolved::Node(node) => node,
            absorbed @ Resolved::Absorbed(_) => return Ok(absorbed),
        };
        match &self.preoperation {
            Some(op) => Ok(Resolved::Node(Cow::Owned(Value::String(op.compute(&node)?)))),
            None => Ok(Resolved::Node(node)),
        }
    }
}

/// Configuration builder for path-bearing expressions.
/// Created by [`path()`]; a terminal method validates it and produces an
/// [`Expression`].
#[derive(Debug, Clone)]
#[must_use]
pub struct PathExpr {
    path: String,
    default_result: Option<Option<bool>>,
    preoperation: Option<PreOperation>,
}

/// Start building an expression over the node at `path`.
pub fn path(path: &str) -> PathExpr {
    PathExpr {
        path: path.to_owned(),
        default_result: None,
        preoperation: None,
    }
}

impl PathExpr {
    /// Attach the single pre-operation. Replaces any previous one.
    pub fn preoperation(mut self, op: PreOperation) -> Self {
        self.preoperation = Some(op);
        self
    }

    /// Result substituted when the path fails to resolve.
    pub fn default_result(mut self, result: bool) -> Self {
        self.default_result = Some(Some(result));
        self
    }

    /// Surface path-resolution failures as faults instead of absorbing them.
    pub fn propagate_missing(mut self) -> Self {
        self.default_result = Some(None);
        self
    }

    pub(crate) fn with_default_result(mut self, policy: Option<Option<bool>>) -> Self {
        self.default_result = policy;
        self
    }

    pub(crate) fn into_target(self, expression: ExpressionType) -> Result<PathTarget, BuildError> {
        if self.preoperation.is_some() && !expression.accepts_preoperation() {
            return Err(BuildError::PreOperationNotSupported { expression });
        }
        Ok(PathTarget {
            path: self.path,
            default_result: self
                .default_result
                .unwrap_or(Some(expression.default_result())),
            preoperation: self.preoperation,
        })
    }

    pub(crate) fn into_existence(
        self,
        expression: ExpressionType,
    ) -> Result<ExistenceExpression, BuildError> {
        if self.preoperation.is_some() {
            return Err(BuildError::PreOperationNotSupported { expression });
        }
        if self.default_result.is_some() {
            return Err(BuildError::InvalidField {
                expression,
                field: "defaultResult",
                reason: "existence checks never fail to resolve".to_owned(),
            });
        }
        ExistenceExpression::new(expression, self.path)
    }

    // --- equality ---

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `equals`.
    pub fn equals(self, value: impl Into<Value>) -> Result<Expression, BuildError> {
        EqualityExpression::new(ExpressionType::Equals, self, Operand::Value(value.into()))
            .map(Expression::Equality)
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `not_equals`.
    pub fn not_equals(self, value: impl Into<Value>) -> Result<Expression, BuildError> {
        EqualityExpression::new(ExpressionType::NotEquals, self, Operand::Value(value.into()))
            .map(Expression::Equality)
    }

    /// Compare against the node at `other` instead of a literal.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `equals`.
    pub fn equals_path(self, other: &str) -> Result<Expression, BuildError> {
        EqualityExpression::new(ExpressionType::Equals, self, Operand::Path(other.to_owned()))
            .map(Expression::Equality)
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `not_equals`.
    pub fn not_equals_path(self, other: &str) -> Result<Expression, BuildError> {
        EqualityExpression::new(
            ExpressionType::NotEquals,
            self,
            Operand::Path(other.to_owned()),
        )
        .map(Expression::Equality)
    }

    // --- numeric ---

    /// # Errors
    ///
    /// Returns [`BuildError`] if `value` is not numeric.
    pub fn greater_than(self, value: impl Into<Value>) -> Result<Expression, BuildError> {
        self.numeric(ExpressionType::GreaterThan, value.into())
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if `value` is not numeric.
    pub fn greater_than_equals(self, value: impl Into<Value>) -> Result<Expression, BuildError> {
        self.numeric(ExpressionType::GreaterThanEquals, value.into())
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if `value` is not numeric.
    pub fn less_than(self, value: impl Into<Value>) -> Result<Expression, BuildError> {
        self.numeric(ExpressionType::LessThan, value.into())
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if `value` is not numeric.
    pub fn less_than_equals(self, value: impl Into<Value>) -> Result<Expression, BuildError> {
        self.numeric(ExpressionType::LessThanEquals, value.into())
    }

    /// Strictly between `lower` and `upper`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the bounds are not numeric or not ordered.
    pub fn between(
        self,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Result<Expression, BuildError> {
        NumericExpression::new(
            ExpressionType::Between,
            self,
            NumericBound::Between {
                lower: lower.into(),
                upper: upper.into(),
            },
        )
        .map(Expression::Numeric)
    }

    fn numeric(self, expression: ExpressionType, value: Value) -> Result<Expression, BuildError> {
        NumericExpression::new(expression, self, NumericBound::Compare(Operand::Value(value)))
            .map(Expression::Numeric)
    }

    // --- collections ---

    /// Subject is one of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `in`.
    pub fn in_values<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Expression, BuildError> {
        self.collection(ExpressionType::In, literal(values))
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `not_in`.
    pub fn not_in<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Expression, BuildError> {
        self.collection(ExpressionType::NotIn, literal(values))
    }

    /// Every element of the subject array appears in `values`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::PreOperationNotSupported`] if a pre-operation
    /// was attached.
    pub fn contains_all<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Expression, BuildError> {
        self.collection(ExpressionType::ContainsAll, literal(values))
    }

    /// The subject array shares at least one element with `values`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::PreOperationNotSupported`] if a pre-operation
    /// was attached.
    pub fn contains_any<V: Into<Value>>(
        self,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Expression, BuildError> {
        self.collection(ExpressionType::ContainsAny, literal(values))
    }

    /// Any collection variant with the comparison set read from the
    /// document at `values_path`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if `expression` is not a collection variant or
    /// the configuration is invalid for it.
    pub fn collection_from_path(
        self,
        expression: ExpressionType,
        values_path: &str,
    ) -> Result<Expression, BuildError> {
        self.collection(expression, ValueSource::Path(values_path.to_owned()))
    }

    fn collection(
        self,
        expression: ExpressionType,
        source: ValueSource,
    ) -> Result<Expression, BuildError> {
        CollectionExpression::new(expression, self, source).map(Expression::Collection)
    }

    // --- presence ---

    /// Subject text is null or has zero length.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `empty`.
    pub fn empty(self) -> Result<Expression, BuildError> {
        PresenceExpression::new(ExpressionType::Empty, self).map(Expression::Presence)
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `not_empty`.
    pub fn not_empty(self) -> Result<Expression, BuildError> {
        PresenceExpression::new(ExpressionType::NotEmpty, self).map(Expression::Presence)
    }

    // --- string matching ---

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `starts_with`.
    pub fn starts_with(self, prefix: &str, ignore_case: bool) -> Result<Expression, BuildError> {
        StringMatchExpression::new(ExpressionType::StartsWith, self, prefix, ignore_case)
            .map(Expression::StringMatch)
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if the configuration is invalid for `ends_with`.
    pub fn ends_with(self, suffix: &str, ignore_case: bool) -> Result<Expression, BuildError> {
        StringMatchExpression::new(ExpressionType::EndsWith, self, suffix, ignore_case)
            .map(Expression::StringMatch)
    }

    /// The whole subject text matches the regular expression `pattern`;
    /// a match of only part of the text does not count.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidRegex`] if `pattern` does not compile.
    pub fn matches(self, pattern: &str, ignore_case: bool) -> Result<Expression, BuildError> {
        StringMatchExpression::new(ExpressionType::Matches, self, pattern, ignore_case)
            .map(Expression::StringMatch)
    }

    // --- existence ---

    /// The path resolves to some node, `null` included.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a pre-operation or default result was set.
    pub fn exists(self) -> Result<Expression, BuildError> {
        self.into_existence(ExpressionType::Exists)
            .map(Expression::Existence)
    }

    /// # Errors
    ///
    /// Returns [`BuildError`] if a pre-operation or default result was set.
    pub fn not_exists(self) -> Result<Expression, BuildError> {
        self.into_existence(ExpressionType::NotExists)
            .map(Expression::Existence)
    }
}

fn literal<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> ValueSource {
    ValueSource::Values(values.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PreOperationType;
    use serde_json::json;

    #[test]
    fn default_result_follows_variant() {
        let target = path("$.a").into_target(ExpressionType::Equals).unwrap();
        assert_eq!(target.default_result(), Some(false));
        let target = path("$.a").into_target(ExpressionType::NotEquals).unwrap();
        assert_eq!(target.default_result(), Some(true));
    }

    #[test]
    fn explicit_default_result_wins() {
        let target = path("$.a")
            .default_result(true)
            .into_target(ExpressionType::Equals)
            .unwrap();
        assert_eq!(target.default_result(), Some(true));
    }

    #[test]
    fn propagate_missing_clears_default() {
        let target = path("$.a")
            .propagate_missing()
            .into_target(ExpressionType::Equals)
            .unwrap();
        assert_eq!(target.default_result(), None);
    }

    #[test]
    fn preoperation_rejected_where_forbidden() {
        let err = path("$.a")
            .preoperation(PreOperation::new(PreOperationType::SubStrAfter))
            .into_target(ExpressionType::ContainsAll)
            .unwrap_err();
        assert!(matches!(
            err,
            BuildError::PreOperationNotSupported {
                expression: ExpressionType::ContainsAll
            }
        ));
    }

    #[test]
    fn absorbed_miss_yields_default() {
        let doc = json!({});
        let ctx = EvaluationContext::new(&doc);
        let target = path("$.a").into_target(ExpressionType::NotEquals).unwrap();
        assert!(matches!(
            target.resolve_subject(&ctx).unwrap(),
            Resolved::Absorbed(true)
        ));
    }

    #[test]
    fn unabsorbed_miss_faults() {
        let doc = json!({});
        let ctx = EvaluationContext::new(&doc);
        let target = path("$.a")
            .propagate_missing()
            .into_target(ExpressionType::Equals)
            .unwrap();
        assert!(target.resolve_subject(&ctx).is_err());
    }

    #[test]
    fn preoperation_applies_to_subject() {
        let doc = json!({"a": "key:value"});
        let ctx = EvaluationContext::new(&doc);
        let target = path("$.a")
            .preoperation(PreOperation::sub_str_after(":"))
            .into_target(ExpressionType::Equals)
            .unwrap();
        match target.resolve_subject(&ctx).unwrap() {
            Resolved::Node(node) => assert_eq!(*node, json!("value")),
            Resolved::Absorbed(_) => panic!("expected a node"),
        }
    }

    #[test]
    fn existence_rejects_default_result() {
        assert!(path("$.a").default_result(true).exists().is_err());
        assert!(path("$.a").exists().is_ok());
    }
}
