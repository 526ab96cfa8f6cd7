use std::fmt;

use super::collection::CollectionExpression;
use super::composite::CompositeExpression;
use super::equality::{EqualityExpression, Operand};
use super::existence::ExistenceExpression;
use super::numeric::NumericExpression;
use super::presence::PresenceExpression;
use super::string_match::StringMatchExpression;
use super::value::json_depth;
use super::{BuildError, ExpressionType, PathTarget};

/// Deepest array/object nesting the canonical text of a tree may reach.
///
/// Construction rejects anything deeper, so every built tree can be read
/// back from its own representation.
pub const MAX_NESTING: usize = 100;

pub(crate) fn check_nesting(
    expression: ExpressionType,
    nesting: usize,
) -> Result<usize, BuildError> {
    if nesting > MAX_NESTING {
        return Err(BuildError::TooDeep {
            expression,
            nesting,
            limit: MAX_NESTING,
        });
    }
    Ok(nesting)
}

/// A leaf object holding a pre-operation object or a literal `literal`
/// levels deep.
pub(crate) fn leaf_nesting(target: &PathTarget, literal: usize) -> usize {
    1 + literal.max(usize::from(target.preoperation().is_some()))
}

/// A node of a rule tree.
///
/// The set of variants is closed; each wraps the concrete configuration of
/// one expression family. Trees are immutable once built and can be shared
/// across threads for concurrent evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Equality(EqualityExpression),
    Numeric(NumericExpression),
    Collection(CollectionExpression),
    Presence(PresenceExpression),
    StringMatch(StringMatchExpression),
    Existence(ExistenceExpression),
    Composite(CompositeExpression),
}

impl Expression {
    /// `and` over `children`, evaluated first to last.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyChildren`] if `children` is empty.
    pub fn and(children: impl IntoIterator<Item = Expression>) -> Result<Expression, BuildError> {
        CompositeExpression::new(ExpressionType::And, children.into_iter().collect())
            .map(Expression::Composite)
    }

    /// `or` over `children`, evaluated first to last.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::EmptyChildren`] if `children` is empty.
    pub fn or(children: impl IntoIterator<Item = Expression>) -> Result<Expression, BuildError> {
        CompositeExpression::new(ExpressionType::Or, children.into_iter().collect())
            .map(Expression::Composite)
    }

    /// Negation of a single child.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TooDeep`] if the negation would nest deeper
    /// than [`MAX_NESTING`].
    pub fn not(child: Expression) -> Result<Expression, BuildError> {
        CompositeExpression::new(ExpressionType::Not, vec![child]).map(Expression::Composite)
    }

    #[must_use]
    pub fn expression_type(&self) -> ExpressionType {
        match self {
            Expression::Equality(e) => e.expression_type(),
            Expression::Numeric(e) => e.expression_type(),
            Expression::Collection(e) => e.expression_type(),
            Expression::Presence(e) => e.expression_type(),
            Expression::StringMatch(e) => e.expression_type(),
            Expression::Existence(e) => e.expression_type(),
            Expression::Composite(e) => e.expression_type(),
        }
    }

    /// Subject configuration, for variants that carry one.
    #[must_use]
    pub fn target(&self) -> Option<&PathTarget> {
        match self {
            Expression::Equality(e) => Some(e.target()),
            Expression::Numeric(e) => Some(e.target()),
            Expression::Collection(e) => Some(e.target()),
            Expression::Presence(e) => Some(e.target()),
            Expression::StringMatch(e) => Some(e.target()),
            Expression::Existence(_) | Expression::Composite(_) => None,
        }
    }

    /// Child expressions; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Expression] {
        match self {
            Expression::Composite(e) => e.children(),
            _ => &[],
        }
    }

    /// Number of nodes in this tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Expression::node_count).sum::<usize>()
    }

    /// Array/object nesting of this tree's canonical text.
    #[must_use]
    pub fn nesting(&self) -> usize {
        match self {
            Expression::Composite(e) => e.nesting(),
            Expression::Equality(e) => match e.operand() {
                Operand::Value(value) => leaf_nesting(e.target(), json_depth(value)),
                Operand::Path(_) => leaf_nesting(e.target(), 0),
            },
            Expression::Collection(e) => leaf_nesting(e.target(), e.source().literal_depth()),
            other => other.target().map_or(1, |target| leaf_nesting(target, 0)),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::serial::to_json(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{path, PreOperation};
    use serde_json::json;

    #[test]
    fn and_collects_children_in_order() {
        let expr = Expression::and([
            path("$.a").equals(1).unwrap(),
            path("$.b").equals(2).unwrap(),
        ])
        .unwrap();
        assert_eq!(expr.expression_type(), ExpressionType::And);
        let paths: Vec<&str> = expr
            .children()
            .iter()
            .map(|c| c.target().unwrap().path())
            .collect();
        assert_eq!(paths, vec!["$.a", "$.b"]);
    }

    #[test]
    fn or_rejects_empty() {
        assert!(Expression::or(Vec::new()).is_err());
    }

    #[test]
    fn not_wraps_one_child() {
        let expr = Expression::not(path("$.banned").equals(true).unwrap()).unwrap();
        assert_eq!(expr.expression_type(), ExpressionType::Not);
        assert_eq!(expr.children().len(), 1);
    }

    #[test]
    fn node_count_walks_tree() {
        let expr = Expression::not(
            Expression::or([
                path("$.a").equals(1).unwrap(),
                path("$.b").empty().unwrap(),
            ])
            .unwrap(),
        )
        .unwrap();
        assert_eq!(expr.node_count(), 4);
    }

    #[test]
    fn nesting_follows_canonical_text() {
        assert_eq!(path("$.a").exists().unwrap().nesting(), 1);
        assert_eq!(path("$.a").equals(json!({"b": [1]})).unwrap().nesting(), 3);
        assert_eq!(path("$.a").in_values(Vec::<i32>::new()).unwrap().nesting(), 1);
        assert_eq!(path("$.a").in_values([json!([1])]).unwrap().nesting(), 3);
        let before = path("$.a")
            .preoperation(PreOperation::sub_str_before(":"))
            .equals("x")
            .unwrap();
        assert_eq!(before.nesting(), 2);
        let negated = Expression::not(before).unwrap();
        assert_eq!(negated.nesting(), 4);
    }

    #[test]
    fn deep_literal_is_rejected() {
        let mut literal = json!(1);
        for _ in 0..MAX_NESTING {
            literal = json!([literal]);
        }
        assert!(matches!(
            path("$.a").equals(literal),
            Err(BuildError::TooDeep { .. })
        ));
    }

    #[test]
    fn leaf_has_target_composite_does_not() {
        let leaf = path("$.a").not_empty().unwrap();
        assert_eq!(leaf.target().unwrap().path(), "$.a");
        assert!(Expression::not(leaf).unwrap().target().is_none());
    }

    #[test]
    fn display_is_canonical_json() {
        let expr = path("$.a").exists().unwrap();
        assert_eq!(expr.to_string(), r#"{"type":"exists","path":"$.a"}"#);
    }
}
