//! FILENAME: core/tom-core/src/grid.rs
//! PURPOSE: An in-memory sheet that a resolved table can be written into.
//! CONTEXT: Keys are 1-indexed sheet coordinates, matching the section ranges
//! produced by the layout. Storage is sparse (HashMap) since tables leave
//! blank separator rows and an empty corner above the side banner.

use std::collections::HashMap;

use crate::cell::CellValue;
use crate::coord::Range;
use crate::number_format::NumberFormatHint;

#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    /// Sparse storage: keys are (row, col), both 1-indexed.
    pub cells: HashMap<(u32, u32), CellValue>,

    /// Number format hints for data cells.
    pub formats: HashMap<(u32, u32), NumberFormatHint>,

    /// Merged regions in absolute sheet coordinates.
    pub merged_regions: Vec<Range>,

    /// Highest row index currently in use (0 when empty).
    pub max_row: u32,

    /// Highest column index currently in use (0 when empty).
    pub max_col: u32,
}

impl SheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value. Empty values are not stored but still extend bounds,
    /// the way an explicitly written blank cell would.
    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "sheet coordinates are 1-indexed");
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    pub fn get_value(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    pub fn set_format(&mut self, row: u32, col: u32, hint: NumberFormatHint) {
        self.formats.insert((row, col), hint);
    }

    pub fn add_merge(&mut self, range: Range) {
        self.merged_regions.push(range);
    }

    /// Display text of a cell, honouring its number format hint.
    pub fn formatted_value(&self, row: u32, col: u32) -> String {
        let Some(value) = self.get_value(row, col) else {
            return String::new();
        };
        match (value.as_f64(), self.formats.get(&(row, col))) {
            (Some(n), Some(hint)) => hint.format(n),
            _ => value.display_value(),
        }
    }

    /// Dense rows from row 1 to `max_row`, each with trailing empty cells removed.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        (1..=self.max_row)
            .map(|row| {
                let mut cells: Vec<CellValue> = (1..=self.max_col)
                    .map(|col| self.get_value(row, col).cloned().unwrap_or_default())
                    .collect();
                while matches!(cells.last(), Some(CellValue::Empty)) {
                    cells.pop();
                }
                cells
            })
            .collect()
    }
}
