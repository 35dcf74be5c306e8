//! FILENAME: core/banner-engine/src/merge.rs
//! Merge Range Detection - Finds regions of a banner to render as one cell.
//!
//! Two kinds of merges are reported:
//! - horizontal: a ragged row's last real cell stretches over the Empty
//!   padding to the right edge
//! - vertical: a run of two or more identical objects in a column
//!
//! Ranges are 0-indexed and local to the banner. Top banners are scanned in
//! their pre-transpose form and the results swapped back.

use tom_core::Range;

use crate::banner::{BannerCell, BannerGrid, Orientation};
use crate::logging::log_debug;

pub fn detect_merge_ranges(banner: &BannerGrid) -> Vec<Range> {
    let cells = banner.pre_transpose_cells();
    let width = cells.first().map_or(0, Vec::len);

    let mut ranges = horizontal_merges(&cells, width);
    ranges.extend(vertical_merges(&cells, width));

    if banner.orientation == Orientation::Top {
        ranges = ranges.iter().map(Range::transposed).collect();
    }

    log_debug!("MERGE", "{:?} banner: {} merge ranges", banner.orientation, ranges.len());
    ranges
}

fn horizontal_merges(cells: &[Vec<BannerCell>], width: usize) -> Vec<Range> {
    let mut ranges = Vec::new();
    for (row, line) in cells.iter().enumerate() {
        let Some(col) = line.iter().position(BannerCell::is_empty) else {
            continue;
        };
        // Rows always start with an axis cell; padding only follows content.
        debug_assert!(col > 0, "banner row {} starts with an empty cell", row);
        if col == 0 {
            continue;
        }
        ranges.push(Range::new(row as u32, (col - 1) as u32, row as u32, (width - 1) as u32));
    }
    ranges
}

fn vertical_merges(cells: &[Vec<BannerCell>], width: usize) -> Vec<Range> {
    let height = cells.len();
    let mut ranges = Vec::new();

    for col in 0..width {
        let mut run_start: Option<usize> = None;
        for row in 0..height {
            let matched = row > 0 && {
                let above = &cells[row - 1][col];
                !above.is_empty() && above.same_object(&cells[row][col])
            };
            match (run_start, matched) {
                (None, true) => run_start = Some(row - 1),
                (Some(start), false) => {
                    ranges.push(Range::new(start as u32, col as u32, (row - 1) as u32, col as u32));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(Range::new(start as u32, col as u32, (height - 1) as u32, col as u32));
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BannerBuilder;
    use crate::definition::{CellItem, SourceAxis, SourceElement};
    use crate::model::AxisTree;

    fn build(axis: SourceAxis, items: &[CellItem]) -> BannerGrid {
        let name = axis.name.clone();
        let tree = AxisTree::build(&[axis]).unwrap();
        let id = tree.root_named(&name).unwrap();
        BannerBuilder::new(&tree, id).cell_items(items).build()
    }

    fn column(ranges: &[Range], col: u32) -> Vec<Range> {
        ranges
            .iter()
            .copied()
            .filter(|r| r.start_col == col && r.end_col == col)
            .collect()
    }

    #[test]
    fn test_distinct_elements_do_not_merge() {
        let grid = build(
            SourceAxis::new("Side", "")
                .with_elements(vec![SourceElement::new("a", "A"), SourceElement::new("b", "B")]),
            &[],
        );
        let ranges = detect_merge_ranges(&grid);
        assert!(column(&ranges, 1).is_empty());
        // the axis column is one run of two
        assert_eq!(column(&ranges, 0), vec![Range::new(0, 0, 1, 0)]);
    }

    #[test]
    fn test_run_of_two_gives_one_range() {
        let items = vec![CellItem::new("Count", 0, 0), CellItem::new("ColPercent", 0, 1)];
        let grid = build(
            SourceAxis::new("Side", "")
                .with_elements(vec![SourceElement::new("a", "A"), SourceElement::new("b", "B")]),
            &items,
        );
        let ranges = detect_merge_ranges(&grid);
        assert_eq!(
            column(&ranges, 1),
            vec![Range::new(0, 1, 1, 1), Range::new(2, 1, 3, 1)]
        );
    }

    #[test]
    fn test_ragged_row_merges_to_right_edge() {
        let age = SourceAxis::new("Age", "").with_elements(vec![SourceElement::new("y", "Young")]);
        let region = SourceAxis::new("Region", "")
            .with_elements(vec![SourceElement::new("n", "North")])
            .with_sub_axis(age);
        let total = SourceAxis::new("Total", "").with_elements(vec![SourceElement::base("t", "Total")]);
        let grid = build(
            SourceAxis::new("Side", "").with_sub_axis(region).with_sub_axis(total),
            &[],
        );
        let ranges = detect_merge_ranges(&grid);
        let horizontal: Vec<Range> = ranges.iter().copied().filter(|r| r.start_row == r.end_row).collect();
        assert_eq!(horizontal, vec![Range::new(1, 1, 1, 3)]);
    }

    #[test]
    fn test_empty_cells_never_merge_vertically() {
        let a = SourceAxis::new("A", "").with_elements(vec![SourceElement::new("a1", "")]);
        let a = a.with_sub_axis(SourceAxis::new("Inner", "").with_elements(vec![SourceElement::new("i", "")]));
        let b = SourceAxis::new("B", "")
            .with_elements(vec![SourceElement::new("b1", ""), SourceElement::new("b2", "")]);
        let grid = build(SourceAxis::new("Side", "").with_sub_axis(a).with_sub_axis(b), &[]);

        // rows 1 and 2 are both padded in columns 2..4
        let ranges = detect_merge_ranges(&grid);
        assert!(column(&ranges, 2).is_empty());
        assert!(column(&ranges, 3).is_empty());
    }

    #[test]
    fn test_top_banner_ranges_are_swapped_back() {
        let items: Vec<CellItem> = Vec::new();
        let grid = build(
            SourceAxis::new("Top", "Brand").with_elements(vec![
                SourceElement::new("x", "X"),
                SourceElement::new("y", "Y"),
                SourceElement::new("z", "Z"),
            ]),
            &items,
        );
        // the axis row spans all three columns
        assert_eq!(detect_merge_ranges(&grid), vec![Range::new(0, 0, 0, 2)]);
    }
}
