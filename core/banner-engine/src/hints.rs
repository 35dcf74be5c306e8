//! FILENAME: core/banner-engine/src/hints.rs
//! Formatting Hints - What a renderer needs to pick a style for each cell.
//!
//! Hints describe the cell (kind, nesting depth, run boundaries, base row,
//! statistic, decimals). They never name fonts, borders or colours.
//! Boundary flags in hints are row-level: a banner row that starts a run in
//! any column marks every cell of that row as `first`.

use serde::{Deserialize, Serialize};
use tom_core::NumberFormatHint;

use crate::banner::{BannerGrid, CellTarget, Orientation};
use crate::model::AxisTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerCellKind {
    Axis,
    Element,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerCellHint {
    pub kind: BannerCellKind,
    pub orientation: Orientation,
    /// Sub-element depth, 0 for top-level elements.
    pub element_level: u32,
    /// Sub-axis depth, 0 for the root axis.
    pub axis_level: u32,
    /// Element whose type contains "Base".
    pub is_base: bool,
    pub first: bool,
    pub last: bool,
    /// Statistic of the row. Side banners with cell items only.
    pub cell_item_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCellHint {
    /// The side row or the top column is a base row.
    pub is_base: bool,
    pub top_first: bool,
    pub side_first: bool,
    /// Statistic of the row, when the side banner has cell items.
    pub cell_item_type: Option<String>,
    pub is_percent_item: bool,
    /// Deepest side element's decimals, or the cell item's when that is 0.
    pub decimals: u32,
    pub show_percent_signs: bool,
    pub number_format: NumberFormatHint,
}

/// Hints for every cell of a banner, in its final (possibly transposed) shape.
pub fn banner_hints(tree: &AxisTree, banner: &BannerGrid) -> Vec<Vec<BannerCellHint>> {
    banner
        .cells
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    let header = match banner.orientation {
                        Orientation::Side => r,
                        Orientation::Top => c,
                    };
                    let (kind, element_level, axis_level, is_base) = match cell.target {
                        CellTarget::Axis(id) => (BannerCellKind::Axis, 0, tree.axis(id).level, false),
                        CellTarget::Element(id) => {
                            let element = tree.element(id);
                            (BannerCellKind::Element, element.level, 0, element.is_base())
                        }
                        CellTarget::Empty => (BannerCellKind::Empty, 0, 0, false),
                    };
                    BannerCellHint {
                        kind,
                        orientation: banner.orientation,
                        element_level,
                        axis_level,
                        is_base,
                        first: banner.masks.first[header],
                        last: banner.masks.last[header],
                        cell_item_type: match banner.orientation {
                            Orientation::Side => banner.masks.cell_items.get(header).map(|c| c.item_type.clone()),
                            Orientation::Top => None,
                        },
                    }
                })
                .collect()
        })
        .collect()
}

/// Hints for a `height` x `width` data block.
pub fn data_hints(
    tree: &AxisTree,
    side: Option<&BannerGrid>,
    top: Option<&BannerGrid>,
    show_percent_signs: bool,
    height: usize,
    width: usize,
) -> Vec<Vec<DataCellHint>> {
    let mask_at = |mask: Option<&Vec<bool>>, i: usize| mask.and_then(|m| m.get(i).copied()).unwrap_or(false);

    (0..height)
        .map(|i| {
            let cell_item = side.and_then(|s| s.masks.cell_items.get(i));
            let element_decimals = side
                .and_then(|s| s.masks.last_element.get(i).copied().flatten())
                .map_or(0, |e| tree.element(e).decimals);
            let decimals = if element_decimals > 0 {
                element_decimals
            } else {
                cell_item.map_or(0, |c| c.decimals)
            };
            let is_percent_item = cell_item.is_some_and(|c| c.is_percent());
            let side_base = mask_at(side.map(|s| &s.masks.base), i);
            let side_first = mask_at(side.map(|s| &s.masks.first), i);

            (0..width)
                .map(|j| DataCellHint {
                    is_base: side_base || mask_at(top.map(|t| &t.masks.base), j),
                    top_first: mask_at(top.map(|t| &t.masks.first), j),
                    side_first,
                    cell_item_type: cell_item.map(|c| c.item_type.clone()),
                    is_percent_item,
                    decimals,
                    show_percent_signs,
                    number_format: NumberFormatHint::new(decimals, show_percent_signs && is_percent_item),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BannerBuilder;
    use crate::definition::{CellItem, SourceAxis, SourceElement};

    fn fixture() -> (AxisTree, BannerGrid, BannerGrid) {
        let mut base = SourceElement::base("base", "Base");
        base.decimals = 0;
        let mut share = SourceElement::new("share", "Share");
        share.decimals = 2;
        let side = SourceAxis::new("Side", "Q1").with_elements(vec![base, share]);
        let top = SourceAxis::new("Top", "Brand")
            .with_elements(vec![SourceElement::base("all", "All"), SourceElement::new("x", "X")]);
        let tree = AxisTree::build(&[side, top]).unwrap();
        let items = vec![CellItem::new("Count", 0, 0), CellItem::new("ColPercent", 1, 1)];
        let side = BannerBuilder::new(&tree, tree.root_named("Side").unwrap())
            .cell_items(&items)
            .build();
        let top = BannerBuilder::new(&tree, tree.root_named("Top").unwrap()).build();
        (tree, side, top)
    }

    #[test]
    fn test_data_hint_decimals_and_percent() {
        let (tree, side, top) = fixture();
        let hints = data_hints(&tree, Some(&side), Some(&top), true, 4, 2);

        // base row, count: bold, no decimals
        assert!(hints[0][1].is_base);
        assert_eq!(hints[0][1].number_format.code(), "0");
        // base row, percent: item decimals apply
        assert_eq!(hints[1][1].decimals, 1);
        assert_eq!(hints[1][1].number_format.code(), "0.0%");
        // share row: element decimals win
        assert_eq!(hints[2][1].decimals, 2);
        assert!(!hints[2][1].is_base);
        assert!(hints[2][0].is_base, "top base column");
        assert_eq!(hints[3][1].number_format.code(), "0.00%");
        assert_eq!(hints[3][1].cell_item_type.as_deref(), Some("ColPercent"));
    }

    #[test]
    fn test_percent_sign_off() {
        let (tree, side, top) = fixture();
        let hints = data_hints(&tree, Some(&side), Some(&top), false, 4, 2);
        assert_eq!(hints[1][0].number_format.code(), "0.0");
        assert!(hints[1][0].is_percent_item);
    }

    #[test]
    fn test_data_hints_without_banners() {
        let tree = AxisTree::default();
        let hints = data_hints(&tree, None, None, true, 1, 2);
        assert_eq!(hints[0][0].decimals, 0);
        assert_eq!(hints[0][0].cell_item_type, None);
        assert!(!hints[0][1].is_base);
    }

    #[test]
    fn test_banner_hints_follow_orientation() {
        let (tree, side, top) = fixture();
        let side_hints = banner_hints(&tree, &side);
        assert_eq!(side_hints.len(), 4);
        assert_eq!(side_hints[0][0].kind, BannerCellKind::Axis);
        assert!(side_hints[0][1].is_base);
        assert_eq!(side_hints[1][0].cell_item_type.as_deref(), Some("ColPercent"));

        let top_hints = banner_hints(&tree, &top);
        assert_eq!(top_hints.len(), 2);
        assert_eq!(top_hints[1][1].kind, BannerCellKind::Element);
        assert_eq!(top_hints[1][1].orientation, Orientation::Top);
        assert_eq!(top_hints[1][1].cell_item_type, None);
        // per header column: column 1 starts a new element run
        assert!(top_hints[0][1].first);
    }
}
