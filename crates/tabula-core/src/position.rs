//! Position and size types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell position in the grid (e.g., "A1")
///
/// Rows and columns are 0-based. Positions order row-major, so sorting a list
/// of positions walks the grid top to bottom, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl Position {
    /// A position that is never valid
    pub const NONE: Position = Position {
        row: u32::MAX,
        col: u32::MAX,
    };

    /// Create a new position
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Check that both coordinates are within the sheet bounds
    pub fn is_valid(&self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse a position from A1-style notation.
    ///
    /// Returns `None` when the text is not letters followed by digits. Text that
    /// has the right shape but addresses a cell beyond the sheet bounds parses
    /// to an invalid position instead, so callers can tell a malformed
    /// reference from an out-of-range one.
    ///
    /// # Examples
    /// ```
    /// use tabula_core::Position;
    ///
    /// let pos = Position::parse("B2").unwrap();
    /// assert_eq!(pos, Position::new(1, 1));
    ///
    /// let far = Position::parse("ZZZZ1").unwrap();
    /// assert!(!far.is_valid());
    ///
    /// assert!(Position::parse("1A").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let letters_len = s.bytes().take_while(|b| b.is_ascii_alphabetic()).count();
        let (letters, digits) = s.split_at(letters_len);

        if letters.is_empty() || digits.is_empty() {
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let number = digits.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });

        // Row numbers are 1-based; "A0" has the right shape but no cell
        let row = number.checked_sub(1).unwrap_or(u32::MAX);

        Some(Self {
            row,
            col: Self::letters_to_column(letters),
        })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = u64::from(col) + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Case insensitive. Saturates at `u32::MAX - 1` instead of overflowing.
    /// Non-letter input is the caller's responsibility.
    pub fn letters_to_column(letters: &str) -> u32 {
        let col = letters.bytes().fold(0u32, |acc, b| {
            let digit = u32::from(b.to_ascii_uppercase() - b'A') + 1;
            acc.saturating_mul(26).saturating_add(digit)
        });
        col.saturating_sub(1)
    }

    /// Format as A1-style string (empty for invalid positions)
    pub fn to_a1_string(&self) -> String {
        if !self.is_valid() {
            return String::new();
        }
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::parse(s.trim()) {
            Some(pos) if pos.is_valid() => Ok(pos),
            Some(pos) => Err(Error::InvalidPosition(pos)),
            None => Err(Error::InvalidPosition(Position::NONE)),
        }
    }
}

/// Dimensions of a rectangle anchored at the origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

impl Size {
    /// Create a new size
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Check if the rectangle has no cells
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Check if a position lies inside the rectangle
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(Position::column_to_letters(0), "A");
        assert_eq!(Position::column_to_letters(25), "Z");
        assert_eq!(Position::column_to_letters(26), "AA");
        assert_eq!(Position::column_to_letters(701), "ZZ");
        assert_eq!(Position::column_to_letters(702), "AAA");
        assert_eq!(Position::column_to_letters(MAX_COLS - 1), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(Position::letters_to_column("A"), 0);
        assert_eq!(Position::letters_to_column("Z"), 25);
        assert_eq!(Position::letters_to_column("AA"), 26);
        assert_eq!(Position::letters_to_column("XFD"), 16383);

        // Case insensitive
        assert_eq!(Position::letters_to_column("ab"), 27);

        // Saturates instead of wrapping
        let huge = "Z".repeat(40);
        assert!(Position::letters_to_column(&huge) >= MAX_COLS);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Position::parse("A1"), Some(Position::new(0, 0)));
        assert_eq!(Position::parse("C100"), Some(Position::new(99, 2)));
        assert_eq!(Position::parse("xfd16384"), Some(Position::new(16383, 16383)));

        assert_eq!(Position::parse(""), None);
        assert_eq!(Position::parse("A"), None);
        assert_eq!(Position::parse("12"), None);
        assert_eq!(Position::parse("A1B"), None);
        assert_eq!(Position::parse("$A$1"), None);
    }

    #[test]
    fn test_parse_out_of_range_is_invalid_not_malformed() {
        let pos = Position::parse("A16385").unwrap();
        assert!(!pos.is_valid());

        let pos = Position::parse("XFE1").unwrap();
        assert!(!pos.is_valid());

        let pos = Position::parse("A0").unwrap();
        assert!(!pos.is_valid());

        let pos = Position::parse("A99999999999999").unwrap();
        assert!(!pos.is_valid());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("B3".parse::<Position>().unwrap(), Position::new(2, 1));
        assert!(matches!(
            "A0".parse::<Position>(),
            Err(Error::InvalidPosition(_))
        ));
        assert_eq!(
            "oops".parse::<Position>(),
            Err(Error::InvalidPosition(Position::NONE))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(0, 0).to_string(), "A1");
        assert_eq!(Position::new(99, 2).to_string(), "C100");
        assert_eq!(Position::NONE.to_string(), "");
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 5),
            Position::new(0, 1),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![Position::new(0, 1), Position::new(0, 5), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_size() {
        let size = Size::new(2, 3);
        assert!(size.contains(Position::new(1, 2)));
        assert!(!size.contains(Position::new(2, 0)));
        assert!(!size.is_empty());
        assert!(Size::default().is_empty());
        assert!(Size::new(4, 0).is_empty());
    }
}
