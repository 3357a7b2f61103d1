//! Cell content and the numeric cache
//!
//! A [`Cell`] is one grid slot. Its [`CellContent`] is exactly one of empty,
//! text or formula; switching variants goes through the [`Sheet`](crate::Sheet)
//! so observer edges stay in step with the formula being replaced.

use std::cell::Cell as CacheSlot;

use ahash::AHashSet;
use tabula_core::{
    CellError, CellResolver, FormulaParser, ParsedFormula, Position, Result, Value, ESCAPE_SIGN,
    FORMULA_SIGN,
};

/// What a cell holds
#[derive(Debug, Default)]
pub enum CellContent {
    /// No content; reads as empty text and as zero
    #[default]
    Empty,

    /// Literal text, stored exactly as entered
    Text(String),

    /// Parsed formula
    Formula(FormulaContent),
}

/// A parsed formula together with the positions it reads
#[derive(Debug)]
pub struct FormulaContent {
    formula: Box<dyn ParsedFormula>,
    /// Sorted, de-duplicated
    references: Vec<Position>,
}

impl FormulaContent {
    fn new(formula: Box<dyn ParsedFormula>) -> Self {
        let mut references = formula.referenced_positions();
        references.sort_unstable();
        references.dedup();
        Self {
            formula,
            references,
        }
    }

    /// Positions read by the formula, row-major, without duplicates
    pub fn references(&self) -> &[Position] {
        &self.references
    }

    /// The parsed formula
    pub fn formula(&self) -> &dyn ParsedFormula {
        self.formula.as_ref()
    }
}

impl CellContent {
    /// Classify raw input.
    ///
    /// - `""` -> Empty
    /// - `=expr` with a non-empty expression -> Formula (parse errors surface here)
    /// - anything else, including a lone `=` -> Text
    pub fn parse(text: &str, parser: &dyn FormulaParser) -> Result<Self> {
        if text.is_empty() {
            return Ok(CellContent::Empty);
        }

        match text.strip_prefix(FORMULA_SIGN) {
            Some(expression) if !expression.is_empty() => {
                let formula = parser.parse(expression)?;
                Ok(CellContent::Formula(FormulaContent::new(formula)))
            }
            _ => Ok(CellContent::Text(text.to_string())),
        }
    }

    /// Check if this is the empty variant
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    /// Check if this is the formula variant
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }

    /// Positions read by a formula; empty for other variants
    pub fn referenced_cells(&self) -> &[Position] {
        match self {
            CellContent::Formula(formula) => formula.references(),
            _ => &[],
        }
    }
}

/// One grid slot
#[derive(Debug, Default)]
pub struct Cell {
    content: CellContent,
    /// Content coerced to a number, or the coercion failure; `None` until
    /// requested after a change
    cache: CacheSlot<Option<std::result::Result<f64, CellError>>>,
    /// Cells whose formula reads this one
    observers: AHashSet<Position>,
}

impl Cell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The current content
    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// Raw text: the stored string for text, `=` plus the canonical
    /// expression for formulas
    pub fn text(&self) -> String {
        match &self.content {
            CellContent::Empty => String::new(),
            CellContent::Text(text) => text.clone(),
            CellContent::Formula(formula) => {
                format!("{}{}", FORMULA_SIGN, formula.formula().canonical_text())
            }
        }
    }

    /// Displayed value. Text loses a leading escape sign; formulas are
    /// evaluated through the numeric cache, and their failures come back as
    /// [`Value::Error`].
    pub fn value(&self, resolver: &dyn CellResolver) -> Value {
        match &self.content {
            CellContent::Empty => Value::empty(),
            CellContent::Text(text) => Value::Text(unescape(text).to_string()),
            CellContent::Formula(_) => match self.number(resolver) {
                Ok(n) => Value::Number(n),
                Err(e) => Value::Error(e),
            },
        }
    }

    /// Positions this cell's formula reads, sorted and without duplicates
    pub fn referenced_cells(&self) -> &[Position] {
        self.content.referenced_cells()
    }

    /// Value coerced to a number, memoized until [`clear_cache`](Self::clear_cache).
    ///
    /// Empty reads as `0`. Text must be a complete numeric literal or the
    /// coercion fails with `#VALUE!`. A formula's own error is passed on.
    /// Failures are cached like numbers.
    pub fn number(&self, resolver: &dyn CellResolver) -> std::result::Result<f64, CellError> {
        if let Some(result) = self.cache.get() {
            return result;
        }

        let result = match &self.content {
            CellContent::Empty => Ok(0.0),
            CellContent::Text(text) => parse_number(unescape(text)).ok_or(CellError::Value),
            CellContent::Formula(formula) => formula.formula().evaluate(resolver),
        };

        self.cache.set(Some(result));
        result
    }

    /// Drop the memoized number for this cell only
    pub fn clear_cache(&self) {
        self.cache.set(None);
    }

    /// Whether a memoized result is present
    pub fn has_cache(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Check if the content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check if some formula reads this cell
    pub fn is_referenced(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Cells whose formula reads this one, in no particular order
    pub fn observers(&self) -> impl Iterator<Item = Position> + '_ {
        self.observers.iter().copied()
    }

    pub(crate) fn replace_content(&mut self, content: CellContent) -> CellContent {
        self.cache.set(None);
        std::mem::replace(&mut self.content, content)
    }

    pub(crate) fn add_observer(&mut self, observer: Position) {
        self.observers.insert(observer);
    }

    pub(crate) fn remove_observer(&mut self, observer: Position) {
        self.observers.remove(&observer);
    }
}

fn unescape(text: &str) -> &str {
    text.strip_prefix(ESCAPE_SIGN).unwrap_or(text)
}

/// Whole-string numeric literal; leading whitespace is allowed, trailing
/// characters are not
fn parse_number(text: &str) -> Option<f64> {
    text.trim_start()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
