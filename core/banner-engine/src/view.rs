//! FILENAME: core/banner-engine/src/view.rs
//! Table View - Renderable output for one table.
//!
//! Everything a renderer needs is resolved here: where each section goes,
//! what it contains, which banner regions merge, and per-cell formatting
//! hints. Banner merge ranges stay local (0-indexed); `merges_for` offsets
//! them onto the sheet.

use serde::{Deserialize, Serialize};
use tom_core::{CellValue, Range};

use crate::banner::BannerGrid;
use crate::data::DataMatrix;
use crate::hints::{BannerCellHint, DataCellHint};
use crate::layout::{Section, TableLayout};
use crate::model::AxisTree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableView {
    /// 1-based position of the table in its document.
    pub index: usize,
    pub name: String,
    pub description: String,
    pub is_populated: bool,
    pub show_percent_signs: bool,

    pub model: AxisTree,
    pub layout: TableLayout,

    pub top_annotations: Vec<String>,
    pub back_reference: Option<String>,
    pub top_banner: Option<BannerGrid>,
    pub side_banner: Option<BannerGrid>,
    pub data: DataMatrix,
    pub bottom_annotations: Vec<String>,

    /// Local merge ranges of each banner.
    pub top_merges: Vec<Range>,
    pub side_merges: Vec<Range>,

    pub top_hints: Vec<Vec<BannerCellHint>>,
    pub side_hints: Vec<Vec<BannerCellHint>>,
    pub data_hints: Vec<Vec<DataCellHint>>,
}

impl TableView {
    /// Worksheet name for this table.
    pub fn sheet_title(&self) -> String {
        format!("T{}", self.index)
    }

    /// Content grid of a present section, shaped like its layout range.
    pub fn section_content(&self, section: Section) -> Option<Vec<Vec<CellValue>>> {
        self.layout.get(section)?;
        let content = match section {
            Section::TopAnnotations => annotation_column(&self.top_annotations),
            Section::BackReference => vec![vec![CellValue::text(self.back_reference.clone()?)]],
            Section::TopBanner => banner_content(self.top_banner.as_ref()?),
            Section::SideBanner => banner_content(self.side_banner.as_ref()?),
            Section::Data => self.data.rows.clone(),
            Section::BottomAnnotations => annotation_column(&self.bottom_annotations),
        };
        Some(content)
    }

    /// Banner merge ranges moved to absolute sheet coordinates.
    pub fn merges_for(&self, section: Section) -> Vec<Range> {
        let local = match section {
            Section::TopBanner => &self.top_merges,
            Section::SideBanner => &self.side_merges,
            _ => return Vec::new(),
        };
        match self.layout.get(section) {
            Some(range) => local.iter().map(|m| m.offset_by(range.origin())).collect(),
            None => Vec::new(),
        }
    }

    pub fn banner_hints(&self, section: Section) -> Option<&[Vec<BannerCellHint>]> {
        match section {
            Section::TopBanner => Some(&self.top_hints),
            Section::SideBanner => Some(&self.side_hints),
            _ => None,
        }
    }
}

fn annotation_column(annotations: &[String]) -> Vec<Vec<CellValue>> {
    annotations
        .iter()
        .map(|a| vec![CellValue::text(a.clone())])
        .collect()
}

fn banner_content(banner: &BannerGrid) -> Vec<Vec<CellValue>> {
    banner
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if cell.label.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::text(cell.label.clone())
                    }
                })
                .collect()
        })
        .collect()
}
