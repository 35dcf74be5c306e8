//! FILENAME: core/banner-engine/src/render.rs
//! Rendering seam - Hands a resolved TableView to an output writer.
//!
//! The engine never produces a file format itself. A `Renderer` receives
//! absolute 1-indexed cell writes, merge requests and formatting hints;
//! `SheetGrid` is the in-memory renderer used by tests and previews.

use std::convert::Infallible;

use tom_core::{CellValue, Range, SheetGrid};

use crate::hints::{BannerCellHint, DataCellHint};
use crate::layout::Section;
use crate::logging::log_debug;
use crate::view::TableView;

pub trait Renderer {
    type Error;

    fn write_value(&mut self, row: u32, col: u32, value: &CellValue) -> Result<(), Self::Error>;

    fn merge_range(&mut self, range: Range) -> Result<(), Self::Error>;

    fn apply_banner_hint(&mut self, _row: u32, _col: u32, _hint: &BannerCellHint) -> Result<(), Self::Error> {
        Ok(())
    }

    fn apply_data_hint(&mut self, _row: u32, _col: u32, _hint: &DataCellHint) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walks the sections of a view in stacking order and feeds a renderer.
pub struct SheetWriter<'a> {
    view: &'a TableView,
}

impl<'a> SheetWriter<'a> {
    pub fn new(view: &'a TableView) -> Self {
        SheetWriter { view }
    }

    pub fn write<R: Renderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        let view = self.view;
        for (section, range) in view.layout.sections() {
            let Some(content) = view.section_content(section) else {
                continue;
            };

            for (r, row) in content.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    let (sheet_row, sheet_col) = (range.start_row + r as u32, range.start_col + c as u32);
                    renderer.write_value(sheet_row, sheet_col, value)?;

                    if let Some(hints) = view.banner_hints(section) {
                        if let Some(hint) = hints.get(r).and_then(|h| h.get(c)) {
                            renderer.apply_banner_hint(sheet_row, sheet_col, hint)?;
                        }
                    } else if section == Section::Data {
                        if let Some(hint) = view.data_hints.get(r).and_then(|h| h.get(c)) {
                            renderer.apply_data_hint(sheet_row, sheet_col, hint)?;
                        }
                    }
                }
            }

            for merge in view.merges_for(section) {
                renderer.merge_range(merge)?;
            }
        }
        log_debug!("RENDER", "wrote table {} extent={:?}", view.index, view.layout.extent());
        Ok(())
    }
}

impl Renderer for SheetGrid {
    type Error = Infallible;

    fn write_value(&mut self, row: u32, col: u32, value: &CellValue) -> Result<(), Self::Error> {
        self.set_value(row, col, value.clone());
        Ok(())
    }

    fn merge_range(&mut self, range: Range) -> Result<(), Self::Error> {
        self.add_merge(range);
        Ok(())
    }

    fn apply_data_hint(&mut self, row: u32, col: u32, hint: &DataCellHint) -> Result<(), Self::Error> {
        self.set_format(row, col, hint.number_format);
        Ok(())
    }
}

/// Renders a view into a fresh in-memory sheet.
pub fn render_to_grid(view: &TableView) -> SheetGrid {
    let mut grid = SheetGrid::new();
    match SheetWriter::new(view).write(&mut grid) {
        Ok(()) => grid,
        Err(never) => match never {},
    }
}
