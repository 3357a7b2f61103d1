//! Formula evaluator
//!
//! Evaluates formula ASTs to numbers. Failures are [`CellError`] values, never
//! panics: a reference outside the sheet is `#REF!`, an operand that cannot be
//! read as a number carries the resolver's error, and any non-finite result is
//! `#DIV/0!`.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use tabula_core::{CellError, CellResolver};

/// Evaluate a formula expression
pub fn evaluate(expr: &FormulaExpr, resolver: &dyn CellResolver) -> Result<f64, CellError> {
    let result = match expr {
        FormulaExpr::Number(n) => *n,

        FormulaExpr::CellRef(pos) => {
            if !pos.is_valid() {
                return Err(CellError::Ref);
            }
            resolver.number_at(*pos)?
        }

        FormulaExpr::UnaryOp { op, operand } => {
            let value = evaluate(operand, resolver)?;
            match op {
                UnaryOperator::Plus => value,
                UnaryOperator::Negate => -value,
            }
        }

        FormulaExpr::BinaryOp { op, left, right } => {
            // Left operand's error wins
            let l = evaluate(left, resolver)?;
            let r = evaluate(right, resolver)?;
            match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
            }
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(CellError::Div0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_formula;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tabula_core::Position;

    /// Resolver backed by a fixed map; absent positions read as zero
    #[derive(Default)]
    struct MapResolver(HashMap<Position, Result<f64, CellError>>);

    impl CellResolver for MapResolver {
        fn number_at(&self, pos: Position) -> Result<f64, CellError> {
            self.0.get(&pos).cloned().unwrap_or(Ok(0.0))
        }
    }

    fn eval(expression: &str) -> Result<f64, CellError> {
        eval_with(expression, &MapResolver::default())
    }

    fn eval_with(expression: &str, resolver: &MapResolver) -> Result<f64, CellError> {
        let ast = parse_formula(expression).unwrap();
        evaluate(&ast, resolver)
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2*3"), Ok(7.0));
        assert_eq!(eval("(1+2)*3"), Ok(9.0));
        assert_eq!(eval("8-4-2"), Ok(2.0));
        assert_eq!(eval("8/4/2"), Ok(1.0));
        assert_eq!(eval("-5+--2"), Ok(-3.0));
        assert_eq!(eval("+3"), Ok(3.0));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(eval("1/0"), Err(CellError::Div0));
        assert_eq!(eval("0/0"), Err(CellError::Div0));
    }

    #[test]
    fn test_evaluate_overflow_is_div0() {
        assert_eq!(eval("1e308*10"), Err(CellError::Div0));
    }

    #[test]
    fn test_evaluate_references() {
        let mut resolver = MapResolver::default();
        resolver.0.insert(Position::new(0, 0), Ok(10.0));
        resolver.0.insert(Position::new(0, 1), Ok(5.0));

        assert_eq!(eval_with("A1+B1", &resolver), Ok(15.0));
        assert_eq!(eval_with("A1/B1", &resolver), Ok(2.0));
        // Unset cells read as zero
        assert_eq!(eval_with("A1/C1", &resolver), Err(CellError::Div0));
    }

    #[test]
    fn test_evaluate_propagates_resolver_errors() {
        let mut resolver = MapResolver::default();
        resolver.0.insert(Position::new(0, 0), Err(CellError::Value));

        assert_eq!(eval_with("A1+1", &resolver), Err(CellError::Value));
        assert_eq!(eval_with("1/0+A1", &resolver), Err(CellError::Div0));
    }

    #[test]
    fn test_evaluate_out_of_range_reference() {
        assert_eq!(eval("ZZZZ1+1"), Err(CellError::Ref));
    }
}
