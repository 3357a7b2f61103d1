//! Parsed formulas behind the [`tabula_core`] boundary traits

use tabula_core::{CellError, CellResolver, FormulaParser, ParsedFormula, Position};

use crate::ast::FormulaExpr;
use crate::error::FormulaResult;
use crate::evaluator::evaluate;
use crate::parser::parse_formula;

/// A parsed arithmetic formula
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: FormulaExpr,
}

impl Formula {
    /// Parse an expression (without the leading formula sign)
    pub fn parse(expression: &str) -> FormulaResult<Self> {
        Ok(Self {
            expr: parse_formula(expression)?,
        })
    }

    /// The syntax tree
    pub fn expr(&self) -> &FormulaExpr {
        &self.expr
    }
}

impl ParsedFormula for Formula {
    fn evaluate(&self, resolver: &dyn CellResolver) -> Result<f64, CellError> {
        evaluate(&self.expr, resolver)
    }

    fn referenced_positions(&self) -> Vec<Position> {
        let mut refs = Vec::new();
        self.expr.collect_references(&mut refs);
        refs
    }

    fn canonical_text(&self) -> String {
        self.expr.to_string()
    }
}

/// The default [`FormulaParser`]: numbers, A1 references, `+ - * /`,
/// unary signs and parentheses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArithmeticParser;

impl FormulaParser for ArithmeticParser {
    fn parse(&self, expression: &str) -> tabula_core::Result<Box<dyn ParsedFormula>> {
        let formula = Formula::parse(expression)?;
        Ok(Box::new(formula))
    }
}
