use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::target::{PathExpr, PathTarget, Resolved};
use super::{BuildError, EvaluationContext, EvaluationError, ExpressionFamily, ExpressionType};

/// `starts_with`, `ends_with` and `matches`.
///
/// Non-text subjects never match. The `matches` pattern must match the
/// whole subject text, not a substring of it; it is compiled once, at
/// construction, wrapped as `^(?:pattern)$`. The canonical form keeps the
/// pattern as written.
#[derive(Debug, Clone)]
pub struct StringMatchExpression {
    expression_type: ExpressionType,
    target: PathTarget,
    value: String,
    ignore_case: bool,
    regex: Option<Regex>,
}

impl PartialEq for StringMatchExpression {
    fn eq(&self, other: &Self) -> bool {
        self.expression_type == other.expression_type
            && self.target == other.target
            && self.value == other.value
            && self.ignore_case == other.ignore_case
    }
}

impl StringMatchExpression {
    pub(crate) fn new(
        expression_type: ExpressionType,
        target: PathExpr,
        value: &str,
        ignore_case: bool,
    ) -> Result<Self, BuildError> {
        debug_assert_eq!(expression_type.family(), ExpressionFamily::StringMatch);
        let regex = match expression_type {
            ExpressionType::Matches => Some(
                RegexBuilder::new(&format!("^(?:{value})$"))
                    .case_insensitive(ignore_case)
                    .build()
                    .map_err(|source| BuildError::InvalidRegex {
                        pattern: value.to_owned(),
                        source,
                    })?,
            ),
            _ => None,
        };
        Ok(Self {
            target: target.into_target(expression_type)?,
            expression_type,
            value: value.to_owned(),
            ignore_case,
            regex,
        })
    }

    #[must_use]
    pub fn expression_type(&self) -> ExpressionType {
        self.expression_type
    }

    #[must_use]
    pub fn target(&self) -> &PathTarget {
        &self.target
    }

    /// The prefix, suffix or pattern.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    pub(crate) fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let subject = match self.target.resolve_subject(ctx)? {
            Resolved::Node(node) => node,
            Resolved::Absorbed(result) => return Ok(result),
        };
        let Value::String(text) = subject.as_ref() else {
            return Ok(false);
        };
        if let Some(regex) = &self.regex {
            return Ok(regex.is_match(text));
        }
        let (text, value) = if self.ignore_case {
            (text.to_lowercase(), self.value.to_lowercase())
        } else {
            (text.clone(), self.value.clone())
        };
        Ok(match self.expression_type {
            ExpressionType::StartsWith => text.starts_with(&value),
            _ => text.ends_with(&value),
        })
    }
}
