//! FILENAME: core/tom-core/src/coord.rs
//! PURPOSE: Rectangular regions of a table grid.
//! CONTEXT: A `Range` is inclusive on both ends. Section ranges produced by the
//! layout are 1-indexed (row 1 / column 1 is the top-left sheet cell); merge
//! ranges produced for a banner are 0-indexed and local to that banner until
//! they are offset by the banner's absolute origin.

use serde::{Deserialize, Serialize};

/// A cell coordinate as (row, col).
pub type CellCoord = (u32, u32);

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl Range {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        debug_assert!(start_row <= end_row && start_col <= end_col);
        Range {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// A range of `height` x `width` cells whose top-left corner is `origin`.
    /// Both dimensions must be at least 1.
    pub fn from_origin(origin: CellCoord, height: u32, width: u32) -> Self {
        debug_assert!(height > 0 && width > 0);
        Range::new(
            origin.0,
            origin.1,
            origin.0 + height - 1,
            origin.1 + width - 1,
        )
    }

    pub fn origin(&self) -> CellCoord {
        (self.start_row, self.start_col)
    }

    /// Shifts a local range so that local (0, 0) lands on `origin`.
    pub fn offset_by(&self, origin: CellCoord) -> Self {
        Range {
            start_row: self.start_row + origin.0,
            start_col: self.start_col + origin.1,
            end_row: self.end_row + origin.0,
            end_col: self.end_col + origin.1,
        }
    }

    /// Swaps rows and columns.
    pub fn transposed(&self) -> Self {
        Range {
            start_row: self.start_col,
            start_col: self.start_row,
            end_row: self.end_col,
            end_col: self.end_row,
        }
    }
}
