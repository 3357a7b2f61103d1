//! Sheet: lazy grid storage, edits and the printable area

use tabula_core::{CellError, CellResolver, Error, FormulaParser, Position, Result, Size, Value};
use tabula_formula::ArithmeticParser;

use crate::cell::{Cell, CellContent};
use crate::options::SheetOptions;

/// A grid of cells with automatic recomputation
///
/// Storage is a dense table of optional cells that grows on demand and never
/// shrinks. The printable size is tracked separately: the smallest
/// origin-anchored rectangle holding every non-empty cell.
///
/// # Example
///
/// ```rust
/// use tabula::{Position, Sheet, Value};
///
/// let mut sheet = Sheet::new();
/// let a1 = Position::new(0, 0);
/// let b1 = Position::new(0, 1);
///
/// sheet.set_cell(a1, "=B1+1").unwrap();
/// sheet.set_cell(b1, "5").unwrap();
/// assert_eq!(sheet.value(a1).unwrap(), Value::Number(6.0));
///
/// sheet.set_cell(b1, "10").unwrap();
/// assert_eq!(sheet.value(a1).unwrap(), Value::Number(11.0));
/// ```
#[derive(Debug)]
pub struct Sheet {
    /// Row-major slots; every row is `actual_size.cols` long
    cells: Vec<Vec<Option<Cell>>>,
    actual_size: Size,
    printable_size: Size,
    parser: Box<dyn FormulaParser>,
}

impl Sheet {
    /// Create an empty sheet with the default formula parser
    pub fn new() -> Self {
        Self::with_options(SheetOptions::default())
    }

    /// Create an empty sheet with the given options
    pub fn with_options(options: SheetOptions) -> Self {
        Self::with_parser(options, Box::new(ArithmeticParser))
    }

    /// Create an empty sheet that parses formulas with `parser`
    pub fn with_parser(options: SheetOptions, parser: Box<dyn FormulaParser>) -> Self {
        let mut sheet = Self {
            cells: Vec::new(),
            actual_size: Size::default(),
            printable_size: Size::default(),
            parser,
        };
        sheet.grow_to(options.clamped_capacity());
        sheet
    }

    // === Edits ===

    /// Set a cell from raw input text.
    ///
    /// Fails without touching the sheet if the position is invalid, the
    /// formula does not parse, a referenced position is invalid, or the
    /// formula would close a reference cycle.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        ensure_valid(pos)?;

        let content = CellContent::parse(text, self.parser.as_ref())?;
        let references = content.referenced_cells().to_vec();
        for &referenced in &references {
            ensure_valid(referenced)?;
        }
        self.check_circular(pos, &references)?;

        // Nothing below can fail
        for &referenced in &references {
            self.concrete_cell(referenced);
        }
        let old = self.concrete_cell(pos).replace_content(content);
        self.unlink(pos, old.referenced_cells());
        self.link(pos, &references);
        self.invalidate(pos);
        self.resize_printable(pos);

        log::debug!(
            "set {} ({} references), printable size now {:?}",
            pos,
            references.len(),
            self.printable_size
        );
        Ok(())
    }

    /// Remove a cell's content.
    ///
    /// The slot is freed unless another formula still reads it, in which case
    /// an empty cell stays behind to carry that observer edge.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        ensure_valid(pos)?;

        let Some(cell) = self.cell_at_mut(pos) else {
            return Ok(());
        };
        let old = cell.replace_content(CellContent::Empty);
        let still_observed = cell.is_referenced();

        self.unlink(pos, old.referenced_cells());
        self.invalidate(pos);
        if !still_observed {
            self.cells[pos.row as usize][pos.col as usize] = None;
        }
        self.resize_printable(pos);

        log::debug!(
            "cleared {} (placeholder kept: {}), printable size now {:?}",
            pos,
            still_observed,
            self.printable_size
        );
        Ok(())
    }

    // === Reads ===

    /// Get a cell, or `None` if nothing was ever materialized there
    pub fn get_cell(&self, pos: Position) -> Result<Option<CellView<'_>>> {
        ensure_valid(pos)?;
        Ok(self.cell_at(pos).map(|cell| CellView {
            sheet: self,
            cell,
            position: pos,
        }))
    }

    /// Value at a position (empty text for absent cells)
    pub fn value(&self, pos: Position) -> Result<Value> {
        Ok(self
            .get_cell(pos)?
            .map(|cell| cell.value())
            .unwrap_or_default())
    }

    /// Raw text at a position (empty for absent cells)
    pub fn text(&self, pos: Position) -> Result<String> {
        Ok(self
            .get_cell(pos)?
            .map(|cell| cell.text())
            .unwrap_or_default())
    }

    /// Smallest origin-anchored rectangle holding every non-empty cell
    pub fn printable_size(&self) -> Size {
        self.printable_size
    }

    /// Allocated backing capacity; never shrinks
    pub fn actual_size(&self) -> Size {
        self.actual_size
    }

    /// Iterate the printable area row by row
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<CellView<'_>>>> + '_ {
        let size = self.printable_size;
        (0..size.rows).map(move |row| {
            (0..size.cols)
                .map(|col| {
                    let position = Position::new(row, col);
                    self.cell_at(position).map(|cell| CellView {
                        sheet: self,
                        cell,
                        position,
                    })
                })
                .collect()
        })
    }

    // === Grid storage ===

    pub(crate) fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cells
            .get(pos.row as usize)?
            .get(pos.col as usize)?
            .as_ref()
    }

    pub(crate) fn cell_at_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells
            .get_mut(pos.row as usize)?
            .get_mut(pos.col as usize)?
            .as_mut()
    }

    /// Materialize the cell at a valid position, growing storage if needed
    pub(crate) fn concrete_cell(&mut self, pos: Position) -> &mut Cell {
        debug_assert!(pos.is_valid());
        self.grow_to(Size::new(pos.row + 1, pos.col + 1));
        self.cells[pos.row as usize][pos.col as usize].get_or_insert_with(Cell::new)
    }

    /// Grow backing storage to at least `size` in each dimension
    fn grow_to(&mut self, size: Size) {
        let new_size = Size::new(
            self.actual_size.rows.max(size.rows),
            self.actual_size.cols.max(size.cols),
        );
        if new_size == self.actual_size {
            return;
        }

        let cols = new_size.cols as usize;
        if new_size.cols > self.actual_size.cols {
            for row in &mut self.cells {
                row.resize_with(cols, || None);
            }
        }
        self.cells.resize_with(new_size.rows as usize, || {
            std::iter::repeat_with(|| None).take(cols).collect()
        });

        log::trace!("grid grew from {:?} to {:?}", self.actual_size, new_size);
        self.actual_size = new_size;
    }

    fn is_filled(&self, pos: Position) -> bool {
        self.cell_at(pos).is_some_and(|cell| !cell.is_empty())
    }

    fn row_is_empty(&self, row: u32) -> bool {
        self.cells
            .get(row as usize)
            .map_or(true, |slots| slots.iter().flatten().all(Cell::is_empty))
    }

    fn col_is_empty(&self, col: u32) -> bool {
        self.cells.iter().all(|slots| {
            slots
                .get(col as usize)
                .map_or(true, |slot| slot.as_ref().map_or(true, Cell::is_empty))
        })
    }

    /// Keep the printable size minimal after an edit at `pos`.
    ///
    /// Writes grow the box eagerly. Deletions only rescan when they touch the
    /// trailing row or column.
    fn resize_printable(&mut self, pos: Position) {
        let before = self.printable_size;

        if self.is_filled(pos) {
            self.printable_size.rows = self.printable_size.rows.max(pos.row + 1);
            self.printable_size.cols = self.printable_size.cols.max(pos.col + 1);
        } else {
            self.shrink_printable(pos);
        }

        if before != self.printable_size {
            log::trace!("printable size {:?} -> {:?}", before, self.printable_size);
        }
    }

    fn shrink_printable(&mut self, pos: Position) {
        if self.printable_size.rows > 0 && pos.row == self.printable_size.rows - 1 {
            while self.printable_size.rows > 0 && self.row_is_empty(self.printable_size.rows - 1) {
                self.printable_size.rows -= 1;
            }
            if self.printable_size.rows == 0 {
                self.printable_size = Size::default();
                return;
            }
        }

        if self.printable_size.cols > 0 && pos.col == self.printable_size.cols - 1 {
            while self.printable_size.cols > 0 && self.col_is_empty(self.printable_size.cols - 1) {
                self.printable_size.cols -= 1;
            }
            if self.printable_size.cols == 0 {
                self.printable_size = Size::default();
            }
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl CellResolver for Sheet {
    fn number_at(&self, pos: Position) -> std::result::Result<f64, CellError> {
        if !pos.is_valid() {
            return Err(CellError::Ref);
        }
        let Some(cell) = self.cell_at(pos) else {
            return Ok(0.0);
        };
        if !cell.has_cache() && !cell.referenced_cells().is_empty() {
            // Evaluate the chain bottom-up so nested lookups hit the cache
            self.fill_caches(pos);
        }
        cell.number(self)
    }
}

/// Read handle to a cell inside its sheet
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    cell: &'a Cell,
    position: Position,
}

impl<'a> CellView<'a> {
    /// Where the cell sits
    pub fn position(&self) -> Position {
        self.position
    }

    /// The underlying cell
    pub fn cell(&self) -> &'a Cell {
        self.cell
    }

    /// Displayed value, evaluating formulas against the sheet
    pub fn value(&self) -> Value {
        self.cell.value(self.sheet)
    }

    /// Raw text
    pub fn text(&self) -> String {
        self.cell.text()
    }

    /// Value coerced to a number (memoized)
    pub fn number(&self) -> std::result::Result<f64, CellError> {
        self.cell.number(self.sheet)
    }

    /// Positions read by the cell's formula
    pub fn referenced_cells(&self) -> &'a [Position] {
        self.cell.referenced_cells()
    }

    /// Check if the content is empty
    pub fn is_empty(&self) -> bool {
        self.cell.is_empty()
    }
}

fn ensure_valid(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidPosition(pos))
    }
}
