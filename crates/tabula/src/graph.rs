//! Dependency tracking between formula cells
//!
//! Edges are stored on the cells themselves: a formula cell knows the
//! positions it reads (its references) and every cell knows the positions
//! whose formulas read it (its observers). The two directions are kept in
//! sync by [`Sheet::link`] and [`Sheet::unlink`].

use ahash::AHashSet;
use tabula_core::{Error, Position, Result};

use crate::sheet::Sheet;

impl Sheet {
    /// Fail if giving `target` a formula that reads `references` would close
    /// a cycle, i.e. if `target` is reachable from any of them by following
    /// existing references.
    pub(crate) fn check_circular(&self, target: Position, references: &[Position]) -> Result<()> {
        let mut visited = AHashSet::new();
        let mut stack: Vec<Position> = references.to_vec();

        while let Some(pos) = stack.pop() {
            if pos == target {
                log::debug!("rejected formula at {}: circular reference", target);
                return Err(Error::CircularDependency(target));
            }
            if !visited.insert(pos) {
                continue;
            }
            if let Some(cell) = self.cell_at(pos) {
                stack.extend(cell.referenced_cells().iter().copied());
            }
        }

        Ok(())
    }

    /// Register `observer` as a reader of every position in `references`.
    /// The referenced cells must already be materialized.
    pub(crate) fn link(&mut self, observer: Position, references: &[Position]) {
        for &referenced in references {
            if let Some(cell) = self.cell_at_mut(referenced) {
                cell.add_observer(observer);
            }
        }
    }

    /// Remove `observer` from every position in `references`
    pub(crate) fn unlink(&mut self, observer: Position, references: &[Position]) {
        for &referenced in references {
            if let Some(cell) = self.cell_at_mut(referenced) {
                cell.remove_observer(observer);
            }
        }
    }

    /// Drop cached numbers for `pos` and everything that transitively reads
    /// it. Each cell is visited once.
    pub(crate) fn invalidate(&self, pos: Position) {
        let mut visited = AHashSet::new();
        let mut pending = vec![pos];

        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(cell) = self.cell_at(current) {
                cell.clear_cache();
                pending.extend(cell.observers());
            }
        }

        log::trace!("invalidated {} cell(s) from {}", visited.len(), pos);
    }

    /// Compute and memoize `root` and every uncached cell it transitively
    /// reads, precedents first.
    ///
    /// Each evaluation then finds its inputs cached, so evaluation depth stays
    /// constant however long the reference chain is.
    pub(crate) fn fill_caches(&self, root: Position) {
        let mut visited = AHashSet::new();
        // (position, references already pushed)
        let mut stack = vec![(root, false)];

        while let Some((pos, expanded)) = stack.pop() {
            let Some(cell) = self.cell_at(pos) else {
                continue;
            };
            if expanded {
                let _ = cell.number(self);
                continue;
            }
            if cell.has_cache() || !visited.insert(pos) {
                continue;
            }
            stack.push((pos, true));
            stack.extend(cell.referenced_cells().iter().map(|&r| (r, false)));
        }

        log::trace!("filled {} cache(s) below {}", visited.len(), root);
    }

    /// Positions whose formula reads `pos`, sorted
    pub fn dependents(&self, pos: Position) -> Vec<Position> {
        let mut dependents: Vec<Position> = self
            .cell_at(pos)
            .map(|cell| cell.observers().collect())
            .unwrap_or_default();
        dependents.sort_unstable();
        dependents
    }

    /// Positions read by the formula at `pos`, sorted
    pub fn precedents(&self, pos: Position) -> Vec<Position> {
        self.cell_at(pos)
            .map(|cell| cell.referenced_cells().to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_core::CellError;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_edges_in_both_directions() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("C1"), "=A1+B1").unwrap();

        assert_eq!(sheet.precedents(pos("C1")), vec![pos("A1"), pos("B1")]);
        assert_eq!(sheet.dependents(pos("A1")), vec![pos("C1")]);
        assert_eq!(sheet.dependents(pos("B1")), vec![pos("C1")]);
    }

    #[test]
    fn test_replacing_formula_moves_edges() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("C1"), "=A1").unwrap();
        sheet.set_cell(pos("C1"), "=B1").unwrap();

        assert!(sheet.dependents(pos("A1")).is_empty());
        assert_eq!(sheet.dependents(pos("B1")), vec![pos("C1")]);

        sheet.set_cell(pos("C1"), "plain").unwrap();
        assert!(sheet.dependents(pos("B1")).is_empty());
    }

    #[test]
    fn test_self_reference() {
        let mut sheet = Sheet::new();
        let err = sheet.set_cell(pos("A1"), "=A1").unwrap_err();
        assert_eq!(err, Error::CircularDependency(pos("A1")));
        assert!(sheet.get_cell(pos("A1")).unwrap().is_none());
    }

    #[test]
    fn test_indirect_cycle() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=B1").unwrap();
        sheet.set_cell(pos("B1"), "=C1").unwrap();

        let err = sheet.set_cell(pos("C1"), "=1+A1").unwrap_err();
        assert_eq!(err, Error::CircularDependency(pos("C1")));
        assert_eq!(sheet.text(pos("C1")).unwrap(), "");
        assert!(sheet.dependents(pos("A1")).is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B1"), "=A1").unwrap();
        sheet.set_cell(pos("C1"), "=A1").unwrap();
        sheet.set_cell(pos("D1"), "=B1+C1").unwrap();
        sheet.set_cell(pos("A1"), "2").unwrap();

        assert_eq!(sheet.value(pos("D1")).unwrap().as_number(), Some(4.0));
    }

    #[test]
    fn test_invalidate_reaches_transitive_dependents() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "1").unwrap();
        sheet.set_cell(pos("B1"), "=A1*2").unwrap();
        sheet.set_cell(pos("C1"), "=B1+1").unwrap();
        assert_eq!(sheet.value(pos("C1")).unwrap().as_number(), Some(3.0));
        assert_eq!(sheet.get_cell(pos("C1")).unwrap().unwrap().number(), Ok(3.0));

        let cached = |sheet: &Sheet, p: &str| sheet.cell_at(pos(p)).unwrap().has_cache();
        assert!(cached(&sheet, "A1"));
        assert!(cached(&sheet, "B1"));
        assert!(cached(&sheet, "C1"));

        sheet.invalidate(pos("A1"));
        assert!(!cached(&sheet, "A1"));
        assert!(!cached(&sheet, "B1"));
        assert!(!cached(&sheet, "C1"));
    }

    #[test]
    fn test_fill_caches_visits_precedents_first() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "2").unwrap();
        sheet.set_cell(pos("B1"), "=A1*A1").unwrap();
        sheet.set_cell(pos("C1"), "=A1+B1").unwrap();
        sheet.set_cell(pos("D1"), "=C1/B1").unwrap();

        sheet.fill_caches(pos("D1"));
        for p in ["A1", "B1", "C1", "D1"] {
            assert!(sheet.cell_at(pos(p)).unwrap().has_cache(), "{}", p);
        }
        assert_eq!(sheet.value(pos("D1")).unwrap().as_number(), Some(1.5));
    }

    #[test]
    fn test_long_chain_evaluates_without_recursion() {
        let mut sheet = Sheet::new();
        let len: u32 = 12_000;
        // Top-down, so each cycle check only sees an empty placeholder below
        for row in (2..=len).rev() {
            sheet
                .set_cell(Position::new(row - 1, 0), &format!("=A{}+1", row - 1))
                .unwrap();
        }
        sheet.set_cell(pos("A1"), "1").unwrap();

        let last = Position::new(len - 1, 0);
        assert_eq!(sheet.value(last).unwrap().as_number(), Some(f64::from(len)));

        // Recompute the whole chain after a change at the bottom
        sheet.set_cell(pos("A1"), "=1/0").unwrap();
        assert_eq!(sheet.value(last).unwrap().as_error(), Some(CellError::Div0));
        sheet.set_cell(pos("A1"), "10").unwrap();
        assert_eq!(sheet.value(last).unwrap().as_number(), Some(f64::from(len + 9)));
    }

    #[test]
    fn test_cleared_placeholder_keeps_observers() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B1"), "=A1+1").unwrap();
        sheet.set_cell(pos("A1"), "4").unwrap();
        sheet.clear_cell(pos("A1")).unwrap();

        assert_eq!(sheet.dependents(pos("A1")), vec![pos("B1")]);
        assert_eq!(sheet.value(pos("B1")).unwrap().as_number(), Some(1.0));

        sheet.set_cell(pos("A1"), "9").unwrap();
        assert_eq!(sheet.value(pos("B1")).unwrap().as_number(), Some(10.0));
    }
}
