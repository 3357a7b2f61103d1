//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Values
    CellError,
    // Cell access
    CellView,
    // Error types
    Error,
    Position,
    Result,
    // Main types
    Sheet,
    SheetOptions,
    Size,
    Value,
};
