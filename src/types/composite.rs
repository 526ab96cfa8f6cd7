use super::expr::check_nesting;
use super::{BuildError, ExpressionFamily, ExpressionType};
use super::Expression;

/// `and`, `or` and `not` over owned child expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeExpression {
    expression_type: ExpressionType,
    children: Vec<Expression>,
    nesting: usize,
}

impl CompositeExpression {
    /// Validate the child count for `expression_type`: `and`/`or` need at
    /// least one child, `not` exactly one. The canonical text of the result
    /// must stay within [`MAX_NESTING`](crate::MAX_NESTING) levels.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the child list does not fit the variant,
    /// or [`BuildError::TooDeep`] when the tree nests too deeply.
    pub fn new(expression_type: ExpressionType, children: Vec<Expression>) -> Result<Self, BuildError> {
        if expression_type.family() != ExpressionFamily::Composite {
            return Err(BuildError::InvalidField {
                expression: expression_type,
                field: "children",
                reason: "not a composite expression".to_owned(),
            });
        }
        match (expression_type, children.len()) {
            (_, 0) => Err(BuildError::EmptyChildren {
                expression: expression_type,
            }),
            (ExpressionType::Not, count) if count != 1 => Err(BuildError::ChildCount {
                expression: expression_type,
                count,
            }),
            _ => {
                // The composite object plus its children array.
                let deepest = children.iter().map(Expression::nesting).max().unwrap_or(0);
                let nesting = check_nesting(expression_type, deepest + 2)?;
                Ok(Self {
                    expression_type,
                    children,
                    nesting,
                })
            }
        }
    }

    #[must_use]
    pub fn expression_type(&self) -> ExpressionType {
        self.expression_type
    }

    /// Children in evaluation order.
    #[must_use]
    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    pub(crate) fn nesting(&self) -> usize {
        self.nesting
    }
}
