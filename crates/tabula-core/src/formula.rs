//! Formula evaluator boundary
//!
//! The engine never looks inside a formula. It parses text through a
//! [`FormulaParser`], then talks to the result through [`ParsedFormula`]:
//! which positions it reads, how it prints, and what it evaluates to given a
//! [`CellResolver`] that turns positions into numbers.

use crate::error::Result;
use crate::{CellError, Position};

/// Read access to other cells' numeric values during evaluation
pub trait CellResolver {
    /// Numeric value of the cell at `pos`.
    ///
    /// Empty or absent cells read as `0`. Invalid positions fail with
    /// [`CellError::Ref`]; text that is not a number fails with
    /// [`CellError::Value`]; a formula cell holding an error fails with that
    /// same error.
    fn number_at(&self, pos: Position) -> std::result::Result<f64, CellError>;
}

/// A formula that parsed successfully
pub trait ParsedFormula: std::fmt::Debug {
    /// Evaluate against the sheet.
    ///
    /// In-grid failures come back as `Err(CellError)`; implementations must
    /// not panic on them.
    fn evaluate(&self, resolver: &dyn CellResolver) -> std::result::Result<f64, CellError>;

    /// Positions read by the formula, in any order, possibly repeated
    fn referenced_positions(&self) -> Vec<Position>;

    /// Canonical expression text, without the leading formula sign
    fn canonical_text(&self) -> String;
}

/// Turns expression text into a [`ParsedFormula`]
pub trait FormulaParser: std::fmt::Debug {
    /// Parse an expression (without the leading formula sign).
    ///
    /// Malformed input fails with [`Error::FormulaParse`](crate::Error::FormulaParse).
    fn parse(&self, expression: &str) -> Result<Box<dyn ParsedFormula>>;
}
