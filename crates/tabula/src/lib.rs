//! # tabula
//!
//! A spreadsheet engine core: a two-dimensional grid of cells holding text
//! or arithmetic formulas, with automatic recomputation.
//!
//! ## Features
//!
//! - Lazy grid storage that grows on demand
//! - Formulas over numbers, A1 references, `+ - * /` and parentheses
//! - Reference cycles rejected at edit time
//! - Memoized evaluation, invalidated along the dependency graph
//! - A minimal printable area, kept up to date across edits
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let mut sheet = Sheet::new();
//!
//! sheet.set_cell("A1".parse().unwrap(), "=B1*2").unwrap();
//! sheet.set_cell("B1".parse().unwrap(), "21").unwrap();
//! assert_eq!(sheet.value("A1".parse().unwrap()).unwrap(), Value::Number(42.0));
//!
//! // Cycles are refused and leave the sheet untouched
//! let err = sheet.set_cell("B1".parse().unwrap(), "=A1").unwrap_err();
//! assert!(matches!(err, Error::CircularDependency(_)));
//!
//! let mut out = Vec::new();
//! sheet.print_values(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "42\t21\n");
//! ```

pub mod cell;
mod graph;
pub mod options;
pub mod prelude;
mod print;
pub mod sheet;

pub use cell::{Cell, CellContent, FormulaContent};
pub use options::SheetOptions;
pub use sheet::{CellView, Sheet};

// Re-export core types
pub use tabula_core::{
    CellError, CellResolver, Error, FormulaParser, ParsedFormula, Position, Result, Size,
    Value, ESCAPE_SIGN, FORMULA_SIGN, MAX_COLS, MAX_ROWS,
};

// Re-export the default formula implementation
pub use tabula_formula::{ArithmeticParser, Formula, FormulaError};
