//! FILENAME: core/tom-core/src/lib.rs
//! PURPOSE: Shared value types for the table object model crates.
//! CONTEXT: Re-exports cell values, ranges, number format hints and the
//! in-memory sheet grid for use by the banner engine and by renderers.

pub mod cell;
pub mod coord;
pub mod grid;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use cell::{parse_numeric, parse_numeric_with, CellValue, NumericOptions};
pub use coord::{CellCoord, Range};
pub use grid::SheetGrid;
pub use number_format::NumberFormatHint;
