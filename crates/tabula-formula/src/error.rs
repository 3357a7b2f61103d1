//! Formula error types

use thiserror::Error;

/// Result type for formula parsing
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while parsing a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Identifier that is not a cell reference
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl From<FormulaError> for tabula_core::Error {
    fn from(err: FormulaError) -> Self {
        tabula_core::Error::FormulaParse(err.to_string())
    }
}
