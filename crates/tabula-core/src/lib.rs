//! # tabula-core
//!
//! Core value types for the tabula spreadsheet engine.
//!
//! This crate provides the leaf types shared by the engine and any formula
//! evaluator plugged into it:
//! - [`Position`] and [`Size`] - Grid addressing and bounding rectangles
//! - [`Value`] and [`CellError`] - What a cell evaluates to
//! - [`Error`] - Structural errors rejected at the edit boundary
//! - [`FormulaParser`], [`ParsedFormula`], [`CellResolver`] - The formula boundary
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{Position, Size, Value};
//!
//! let pos: Position = "B3".parse().unwrap();
//! assert_eq!(pos, Position::new(2, 1));
//! assert!(Size::new(3, 2).contains(pos));
//! assert_eq!(Value::Number(6.0).to_string(), "6");
//! ```

pub mod error;
pub mod formula;
pub mod position;
pub mod value;

pub use error::{Error, Result};
pub use formula::{CellResolver, FormulaParser, ParsedFormula};
pub use position::{Position, Size};
pub use value::{CellError, Value};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 16_384;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;

/// Leading character that marks cell text as a formula
pub const FORMULA_SIGN: char = '=';

/// Leading character that forces cell text to be taken literally
pub const ESCAPE_SIGN: char = '\'';
