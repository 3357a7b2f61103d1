//! Formula Abstract Syntax Tree types

use std::fmt;

use tabula_core::Position;

/// Formula expression AST
///
/// Parentheses are not stored: the tree shape carries grouping, and
/// [`Display`](fmt::Display) puts back only the parentheses the shape needs.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    /// Numeric literal
    Number(f64),

    /// Single cell reference (may lie outside the sheet bounds)
    CellRef(Position),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

const PREC_ADDITIVE: u8 = 1;
const PREC_MULTIPLICATIVE: u8 = 2;
const PREC_UNARY: u8 = 3;
const PREC_ATOM: u8 = 4;

impl BinaryOperator {
    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => PREC_ADDITIVE,
            BinaryOperator::Multiply | BinaryOperator::Divide => PREC_MULTIPLICATIVE,
        }
    }

    fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

impl UnaryOperator {
    fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

impl FormulaExpr {
    fn precedence(&self) -> u8 {
        match self {
            FormulaExpr::Number(_) | FormulaExpr::CellRef(_) => PREC_ATOM,
            FormulaExpr::UnaryOp { .. } => PREC_UNARY,
            FormulaExpr::BinaryOp { op, .. } => op.precedence(),
        }
    }

    /// Collect every cell reference in evaluation order (duplicates kept)
    pub fn collect_references(&self, out: &mut Vec<Position>) {
        match self {
            FormulaExpr::Number(_) => {}
            FormulaExpr::CellRef(pos) => out.push(*pos),
            FormulaExpr::BinaryOp { left, right, .. } => {
                left.collect_references(out);
                right.collect_references(out);
            }
            FormulaExpr::UnaryOp { operand, .. } => operand.collect_references(out),
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for FormulaExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaExpr::Number(n) => write!(f, "{}", n),
            FormulaExpr::CellRef(pos) if pos.is_valid() => write!(f, "{}", pos),
            FormulaExpr::CellRef(_) => write!(f, "#REF!"),
            FormulaExpr::BinaryOp { op, left, right } => {
                let prec = op.precedence();
                left.fmt_operand(f, left.precedence() < prec)?;
                write!(f, "{}", op.symbol())?;
                // Operators associate to the left, so an equal-precedence right
                // operand was grouped explicitly
                right.fmt_operand(f, right.precedence() <= prec)
            }
            FormulaExpr::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                operand.fmt_operand(f, operand.precedence() < PREC_UNARY)
            }
        }
    }
}
