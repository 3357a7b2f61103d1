//! Cell value types

use std::fmt;

/// What a cell evaluates to
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric result of a formula
    Number(f64),

    /// Text (empty for empty cells)
    Text(String),

    /// Formula evaluation failure (#REF!, #VALUE!, #DIV/0!)
    Error(CellError),
}

impl Value {
    /// The value of an empty cell
    pub fn empty() -> Self {
        Value::Text(String::new())
    }

    /// Check if this is the empty text value
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the error if this is one
    pub fn as_error(&self) -> Option<CellError> {
        match self {
            Value::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<CellError> for Value {
    fn from(e: CellError) -> Self {
        Value::Error(e)
    }
}

/// Formula error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellError {
    /// #REF! - Reference to a position outside the sheet
    Ref,
    /// #VALUE! - Operand cannot be read as a number
    Value,
    /// #DIV/0! - Division by zero or a non-finite result
    Div0,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::Div0 => "#DIV/0!",
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(6.0).to_string(), "6");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(-1.25).to_string(), "-1.25");
        assert_eq!(Value::Number(1e-7).to_string(), "0.0000001");
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::empty().to_string(), "");
        assert_eq!(Value::Error(CellError::Ref).to_string(), "#REF!");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from(42).as_number(), Some(42.0));
        assert_eq!(Value::from("x").as_number(), None);
        assert_eq!(Value::from("x").as_text(), Some("x"));
        assert_eq!(Value::from(CellError::Value).as_error(), Some(CellError::Value));
        assert!(Value::default().is_empty());
        assert!(!Value::from(0.0).is_empty());
        assert!(Value::from(CellError::Div0).is_error());
    }

    #[test]
    fn test_cell_error_display() {
        assert_eq!(CellError::Div0.to_string(), "#DIV/0!");
        assert_eq!(CellError::Value.to_string(), "#VALUE!");
        assert_eq!(CellError::Ref.to_string(), "#REF!");
    }
}
