//! # tabula-formula
//!
//! Arithmetic formula parser and evaluator for tabula.
//!
//! This crate provides the default implementation of the
//! [`tabula_core::FormulaParser`] boundary:
//! - Formula parsing (text → AST)
//! - Canonical printing (AST → text)
//! - Formula evaluation (AST → number or [`CellError`](tabula_core::CellError))
//!
//! ## Example
//!
//! ```rust
//! use tabula_formula::Formula;
//! use tabula_core::ParsedFormula;
//!
//! let formula = Formula::parse("(1 + 2) * A1").unwrap();
//! assert_eq!(formula.canonical_text(), "(1+2)*A1");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod parser;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::evaluate;
pub use formula::{ArithmeticParser, Formula};
pub use parser::parse_formula;
