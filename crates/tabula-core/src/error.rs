//! Error types for tabula-core

use thiserror::Error;

use crate::Position;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors rejected at the edit boundary.
///
/// None of these are produced once an edit has started mutating the sheet.
/// Evaluation failures are not errors: they travel as
/// [`CellError`](crate::CellError) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Position outside the sheet bounds
    #[error("Invalid position: {0:?}")]
    InvalidPosition(Position),

    /// Malformed formula text
    #[error("Formula parse error: {0}")]
    FormulaParse(String),

    /// Committing the edit would close a reference cycle through this cell
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(Position),
}

impl Error {
    /// Create a formula parse error with a message
    pub fn formula_parse<S: Into<String>>(msg: S) -> Self {
        Error::FormulaParse(msg.into())
    }
}
