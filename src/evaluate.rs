use crate::types::CompositeExpression;
use crate::{EvaluationContext, EvaluationError, Expression, ExpressionType};

impl Expression {
    /// Evaluate this tree against the document wrapped by `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the first fault raised by a node that did not absorb it.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        match self {
            Expression::Equality(e) => e.evaluate(ctx),
            Expression::Numeric(e) => e.evaluate(ctx),
            Expression::Collection(e) => e.evaluate(ctx),
            Expression::Presence(e) => e.evaluate(ctx),
            Expression::StringMatch(e) => e.evaluate(ctx),
            Expression::Existence(e) => e.evaluate(ctx),
            Expression::Composite(e) => eval_composite(e, ctx),
        }
    }
}

/// Every child is evaluated, first to last, before results are combined.
/// Faults propagate in child order.
fn eval_composite(
    expr: &CompositeExpression,
    ctx: &EvaluationContext<'_>,
) -> Result<bool, EvaluationError> {
    let results = expr
        .children()
        .iter()
        .map(|child| child.evaluate(ctx))
        .collect::<Result<Vec<bool>, _>>()?;
    Ok(match expr.expression_type() {
        ExpressionType::And => results.iter().all(|&r| r),
        ExpressionType::Or => results.iter().any(|&r| r),
        _ => !results.first().copied().unwrap_or(false),
    })
}
