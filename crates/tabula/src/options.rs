//! Sheet construction options

use tabula_core::{Size, MAX_COLS, MAX_ROWS};

/// Options for creating a [`Sheet`](crate::Sheet)
#[derive(Debug, Clone, Default)]
pub struct SheetOptions {
    /// Backing storage to allocate up front. The grid still grows on demand
    /// past this; it only saves reallocations for sheets of known shape.
    /// Clamped to the sheet bounds.
    pub initial_capacity: Size,
}

impl SheetOptions {
    /// Options with a preallocated capacity
    pub fn with_capacity(rows: u32, cols: u32) -> Self {
        Self {
            initial_capacity: Size::new(rows, cols),
        }
    }

    /// Capacity clamped to `MAX_ROWS` x `MAX_COLS`
    pub fn clamped_capacity(&self) -> Size {
        Size::new(
            self.initial_capacity.rows.min(MAX_ROWS),
            self.initial_capacity.cols.min(MAX_COLS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_clamped() {
        let options = SheetOptions::with_capacity(u32::MAX, 3);
        assert_eq!(options.clamped_capacity(), Size::new(MAX_ROWS, 3));
        assert_eq!(SheetOptions::default().clamped_capacity(), Size::default());
    }
}
