//! FILENAME: core/banner-engine/src/layout.rs
//! Table Layout - Places each section of a table on the sheet.
//!
//! Sections are stacked top to bottom in a fixed order. Absent sections take
//! no space. The data block shares its rows with the side banner and sits
//! directly right of it; the top banner sits above the data block.

use serde::{Deserialize, Serialize};
use tom_core::Range;

use crate::logging::log_debug;

/// The six logical sections of a rendered table, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    TopAnnotations,
    BackReference,
    TopBanner,
    SideBanner,
    Data,
    BottomAnnotations,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::TopAnnotations,
        Section::BackReference,
        Section::TopBanner,
        Section::SideBanner,
        Section::Data,
        Section::BottomAnnotations,
    ];
}

/// Controls how a table is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// How many leading annotations go above the table. The rest go below.
    pub top_annotation_limit: usize,

    /// Blank rows after the top annotations and after the data block.
    pub separator_rows: u32,

    /// Text of a link back to a table of contents, if the renderer wants one.
    pub back_reference: Option<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            top_annotation_limit: 4,
            separator_rows: 1,
            back_reference: None,
        }
    }
}

/// Dimensions of each section. Zero-sized sections are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionSizes {
    pub top_annotations: u32,
    pub back_reference: bool,
    /// (height, width) of the top banner after transposition.
    pub top_banner: (u32, u32),
    pub side_banner: (u32, u32),
    pub data: (u32, u32),
    pub bottom_annotations: u32,
}

/// Absolute, 1-indexed section ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    pub top_annotations: Option<Range>,
    pub back_reference: Option<Range>,
    pub top_banner: Option<Range>,
    pub side_banner: Option<Range>,
    pub data: Option<Range>,
    pub bottom_annotations: Option<Range>,
}

impl TableLayout {
    pub fn get(&self, section: Section) -> Option<Range> {
        match section {
            Section::TopAnnotations => self.top_annotations,
            Section::BackReference => self.back_reference,
            Section::TopBanner => self.top_banner,
            Section::SideBanner => self.side_banner,
            Section::Data => self.data,
            Section::BottomAnnotations => self.bottom_annotations,
        }
    }

    /// Present sections in stacking order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, Range)> + '_ {
        Section::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|r| (s, r)))
    }

    /// (rows, columns) covered by all sections.
    pub fn extent(&self) -> (u32, u32) {
        self.sections().fold((0, 0), |(rows, cols), (_, r)| {
            (rows.max(r.end_row), cols.max(r.end_col))
        })
    }
}

fn present((height, width): (u32, u32)) -> bool {
    height > 0 && width > 0
}

pub fn compute_layout(sizes: &SectionSizes, options: &LayoutOptions) -> TableLayout {
    let mut layout = TableLayout::default();
    let mut current_row = 1u32;

    if sizes.top_annotations > 0 {
        let range = Range::from_origin((current_row, 1), sizes.top_annotations, 1);
        current_row = range.end_row + 1 + options.separator_rows;
        layout.top_annotations = Some(range);
    }

    if sizes.back_reference {
        let range = Range::from_origin((current_row, 1), 1, 1);
        current_row = range.end_row + 1 + options.separator_rows;
        layout.back_reference = Some(range);
    }

    let side_present = present(sizes.side_banner);

    if present(sizes.top_banner) {
        let col = if side_present { sizes.side_banner.1 + 1 } else { 1 };
        let (height, width) = sizes.top_banner;
        let range = Range::from_origin((current_row, col), height, width);
        current_row = range.end_row + 1;
        layout.top_banner = Some(range);
    }

    if side_present {
        let (height, width) = sizes.side_banner;
        let range = Range::from_origin((current_row, 1), height, width);
        current_row = range.end_row + 1;
        layout.side_banner = Some(range);
    }

    if present(sizes.data) {
        let origin = match layout.side_banner {
            Some(side) => (side.start_row, side.end_col + 1),
            None => (current_row, 1),
        };
        let (height, width) = sizes.data;
        let range = Range::from_origin(origin, height, width);
        current_row = range.end_row + 1 + options.separator_rows;
        layout.data = Some(range);
    }

    if sizes.bottom_annotations > 0 {
        layout.bottom_annotations = Some(Range::from_origin((current_row, 1), sizes.bottom_annotations, 1));
    }

    log_debug!("LAYOUT", "{:?}", layout);
    layout
}
