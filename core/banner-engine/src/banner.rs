//! FILENAME: core/banner-engine/src/banner.rs
//! Banner Builder - Turns an axis into a finalized header grid.
//!
//! Pipeline (each step is a total pass over the previous step's output and
//! must run in this order):
//! 1. Interleave every nested path with its axes: [e1, e2] -> [A1, e1, A2, e2]
//! 2. Replicate each row once per cell item (Side banner only)
//! 3. Materialize a rectangular grid, right-padding short rows with Empty
//! 4. Drop rows containing a hidden element (keeping the visibility mask)
//! 5. Blank labels that repeat the cell above
//! 6. Mark run boundaries (first/last)
//! 7. Derive per-row masks
//! 8. Transpose the Top banner

use serde::{Deserialize, Serialize};

use crate::definition::{CellItem, TOP_AXIS};
use crate::logging::log_debug;
use crate::model::{AxisId, AxisTree, ElementId, Path};

// ============================================================================
// CELLS
// ============================================================================

/// Which banner an axis produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Row headers, one grid row per category x statistic.
    Side,
    /// Column headers, transposed so that each leaf category is a column.
    Top,
}

impl Orientation {
    pub fn for_axis_name(name: &str) -> Self {
        if name == TOP_AXIS {
            Orientation::Top
        } else {
            Orientation::Side
        }
    }
}

/// What a banner cell points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTarget {
    Axis(AxisId),
    Element(ElementId),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerCell {
    pub target: CellTarget,
    /// Display label, blanked when it repeats the cell above.
    pub label: String,
    /// Starts a run of identical values in its column.
    pub first: bool,
    /// Ends a run of identical values in its column.
    pub last: bool,
}

impl BannerCell {
    fn new(tree: &AxisTree, target: CellTarget) -> Self {
        let label = match target {
            CellTarget::Axis(id) => tree.axis(id).label.clone(),
            CellTarget::Element(id) => tree.element(id).label.clone(),
            CellTarget::Empty => String::new(),
        };
        BannerCell {
            target,
            label,
            first: false,
            last: false,
        }
    }

    /// Same referenced axis/element. Two Empty cells count as the same.
    pub fn same_object(&self, other: &BannerCell) -> bool {
        self.target == other.target
    }

    pub fn is_empty(&self) -> bool {
        self.target == CellTarget::Empty
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Per-row data derived after filtering. Indexed by the pre-transpose row,
/// which for a Top banner is the header column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerMasks {
    /// One entry per row before filtering.
    pub visibility: Vec<bool>,
    pub first: Vec<bool>,
    pub last: Vec<bool>,
    pub base: Vec<bool>,
    /// Cell items cycled over the rows. Empty when the banner has none.
    pub cell_items: Vec<CellItem>,
    /// Deepest element of each row.
    pub last_element: Vec<Option<ElementId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerGrid {
    pub orientation: Orientation,
    pub axis: AxisId,
    pub cells: Vec<Vec<BannerCell>>,
    pub height: usize,
    pub width: usize,
    /// Number of cell items each category row was replicated for.
    pub scaling_factor: usize,
    pub masks: BannerMasks,
}

impl BannerGrid {
    pub fn cell(&self, row: usize, col: usize) -> &BannerCell {
        &self.cells[row][col]
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Number of header entries: rows for Side, columns for Top.
    pub fn header_count(&self) -> usize {
        self.masks.first.len()
    }

    /// Swaps rows and columns.
    pub fn transpose(&mut self) {
        self.cells = transpose_cells(&self.cells, self.height, self.width);
        std::mem::swap(&mut self.height, &mut self.width);
    }

    /// The grid as built before the orientation step.
    pub fn pre_transpose_cells(&self) -> Vec<Vec<BannerCell>> {
        match self.orientation {
            Orientation::Side => self.cells.clone(),
            Orientation::Top => transpose_cells(&self.cells, self.height, self.width),
        }
    }

    pub fn labels(&self) -> Vec<Vec<String>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.label.clone()).collect())
            .collect()
    }
}

fn transpose_cells(cells: &[Vec<BannerCell>], height: usize, width: usize) -> Vec<Vec<BannerCell>> {
    (0..width)
        .map(|col| (0..height).map(|row| cells[row][col].clone()).collect())
        .collect()
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct BannerBuilder<'a> {
    tree: &'a AxisTree,
    axis: AxisId,
    orientation: Orientation,
    cell_items: &'a [CellItem],
}

impl<'a> BannerBuilder<'a> {
    pub fn new(tree: &'a AxisTree, axis: AxisId) -> Self {
        BannerBuilder {
            tree,
            axis,
            orientation: Orientation::for_axis_name(&tree.axis(axis).name),
            cell_items: &[],
        }
    }

    /// Rows are replicated once per cell item. Only meaningful for Side.
    pub fn cell_items(mut self, cell_items: &'a [CellItem]) -> Self {
        self.cell_items = cell_items;
        self
    }

    pub fn build(self) -> BannerGrid {
        let tree = self.tree;
        let scaling_factor = self.cell_items.len().max(1);

        let rows = interleave(tree, tree.nested_paths(self.axis));
        let rows = replicate(rows, scaling_factor);
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = materialize(tree, &rows, width);

        let visibility = visibility_mask(tree, &cells);
        let mut cells: Vec<Vec<BannerCell>> = cells
            .into_iter()
            .zip(&visibility)
            .filter(|(_, visible)| **visible)
            .map(|(row, _)| row)
            .collect();

        dedup_labels(&mut cells);
        mark_run_boundaries(&mut cells);

        let mut masks = derive_masks(tree, &cells, self.cell_items);
        masks.visibility = visibility;

        let mut grid = BannerGrid {
            orientation: self.orientation,
            axis: self.axis,
            height: cells.len(),
            width,
            cells,
            scaling_factor,
            masks,
        };

        log_debug!(
            "BANNER",
            "axis '{}' {:?}: {} rows before filter, {}x{} after",
            tree.axis(self.axis).name,
            self.orientation,
            grid.masks.visibility.len(),
            grid.height,
            grid.width
        );

        if self.orientation == Orientation::Top {
            grid.transpose();
        }
        grid
    }
}

/// Each element is preceded by the axis that owns it.
fn interleave(tree: &AxisTree, paths: &[Path]) -> Vec<Vec<CellTarget>> {
    paths
        .iter()
        .map(|path| {
            path.iter()
                .flat_map(|&e| [CellTarget::Axis(tree.element(e).axis), CellTarget::Element(e)])
                .collect()
        })
        .collect()
}

fn replicate(rows: Vec<Vec<CellTarget>>, times: usize) -> Vec<Vec<CellTarget>> {
    if times <= 1 {
        return rows;
    }
    rows.into_iter()
        .flat_map(|row| std::iter::repeat(row).take(times))
        .collect()
}

fn materialize(tree: &AxisTree, rows: &[Vec<CellTarget>], width: usize) -> Vec<Vec<BannerCell>> {
    rows.iter()
        .map(|row| {
            (0..width)
                .map(|col| BannerCell::new(tree, row.get(col).copied().unwrap_or(CellTarget::Empty)))
                .collect()
        })
        .collect()
}

/// A row survives only if every element in it is shown on the table.
fn visibility_mask(tree: &AxisTree, cells: &[Vec<BannerCell>]) -> Vec<bool> {
    cells
        .iter()
        .map(|row| {
            row.iter().all(|cell| match cell.target {
                CellTarget::Element(e) => tree.element(e).visible,
                _ => true,
            })
        })
        .collect()
}

/// Blanks labels that repeat the cell above. An axis cell is only blanked when
/// its left neighbour also continues the row above, so an axis repeated under
/// a new outer category keeps its label.
fn dedup_labels(cells: &mut [Vec<BannerCell>]) {
    for row in 1..cells.len() {
        for col in 0..cells[row].len() {
            let (above, current) = cells.split_at_mut(row);
            let top_row = &above[row - 1];
            let cur_row = &mut current[0];

            let same_as_top = cur_row[col].same_object(&top_row[col]);
            let blank = match cur_row[col].target {
                CellTarget::Axis(_) if col > 0 => {
                    same_as_top && cur_row[col - 1].same_object(&top_row[col - 1])
                }
                CellTarget::Axis(_) | CellTarget::Element(_) => same_as_top,
                CellTarget::Empty => false,
            };
            if blank {
                cur_row[col].label.clear();
            }
        }
    }
}

/// Marks where runs of identical values start and end in each column. When a
/// cell starts a run, the cell above ends one. Axis cells additionally start a
/// run when their left neighbour changed.
fn mark_run_boundaries(cells: &mut [Vec<BannerCell>]) {
    let height = cells.len();
    for row in 0..height {
        for col in 0..cells[row].len() {
            if row == 0 {
                cells[row][col].first = true;
            } else {
                let (above, current) = cells.split_at_mut(row);
                let top_row = &mut above[row - 1];
                let cur_row = &mut current[0];

                let left_changed = col > 0 && !cur_row[col - 1].same_object(&top_row[col - 1]);
                let is_axis = matches!(cur_row[col].target, CellTarget::Axis(_));
                if !cur_row[col].same_object(&top_row[col]) || (is_axis && left_changed) {
                    cur_row[col].first = true;
                    top_row[col].last = true;
                }
            }
            if row + 1 == height {
                cells[row][col].last = true;
            }
        }
    }
}

fn derive_masks(tree: &AxisTree, cells: &[Vec<BannerCell>], cell_items: &[CellItem]) -> BannerMasks {
    let element_of = |cell: &BannerCell| match cell.target {
        CellTarget::Element(e) => Some(e),
        _ => None,
    };

    BannerMasks {
        visibility: Vec::new(),
        first: cells.iter().map(|row| row.iter().any(|c| c.first)).collect(),
        last: cells.iter().map(|row| row.iter().any(|c| c.last)).collect(),
        base: cells
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(element_of)
                    .any(|e| tree.element(e).is_base())
            })
            .collect(),
        cell_items: cell_items.iter().cycle().take(cells.len()).cloned().collect(),
        last_element: cells
            .iter()
            .map(|row| row.iter().filter_map(element_of).last())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{SourceAxis, SourceElement};

    fn side_tree(elements: Vec<SourceElement>) -> (AxisTree, AxisId) {
        let tree = AxisTree::build(&[SourceAxis::new("Side", "Gender").with_elements(elements)]).unwrap();
        let id = tree.root_named("Side").unwrap();
        (tree, id)
    }

    fn nested_tree() -> (AxisTree, AxisId) {
        let age = SourceAxis::new("Age", "Age")
            .with_elements(vec![SourceElement::new("y", "Young"), SourceElement::new("o", "Old")]);
        let side = SourceAxis::new("Side", "Gender")
            .with_elements(vec![SourceElement::new("m", "Male"), SourceElement::new("f", "Female")])
            .with_sub_axis(age);
        let tree = AxisTree::build(&[side]).unwrap();
        let id = tree.root_named("Side").unwrap();
        (tree, id)
    }

    #[test]
    fn test_interleaved_width_and_replicated_height() {
        let (tree, side) = side_tree(vec![SourceElement::new("a", "A"), SourceElement::new("b", "B")]);
        let items = vec![CellItem::new("Count", 0, 0), CellItem::new("ColPercent", 1, 1)];
        let grid = BannerBuilder::new(&tree, side).cell_items(&items).build();

        assert_eq!(grid.width, 2);
        assert_eq!(grid.height, 4);
        assert_eq!(grid.scaling_factor, 2);
        assert_eq!(
            grid.labels(),
            vec![
                vec!["Gender", "A"],
                vec!["", ""],
                vec!["", "B"],
                vec!["", ""],
            ]
        );
        assert_eq!(grid.masks.cell_items.len(), 4);
        assert_eq!(grid.masks.cell_items[2].item_type, "Count");
        assert_eq!(grid.masks.cell_items[3].item_type, "ColPercent");
    }

    #[test]
    fn test_ragged_rows_padded_with_empty() {
        let age = SourceAxis::new("Age", "Age").with_elements(vec![SourceElement::new("y", "Young")]);
        let region = SourceAxis::new("Region", "Region").with_elements(vec![SourceElement::new("n", "North")
            .with_sub_elements(vec![])]);
        let side = SourceAxis::new("Side", "")
            .with_sub_axis(region.with_sub_axis(age))
            .with_sub_axis(SourceAxis::new("Total", "").with_elements(vec![SourceElement::base("t", "Total")]));
        let tree = AxisTree::build(&[side]).unwrap();
        let id = tree.root_named("Side").unwrap();

        let grid = BannerBuilder::new(&tree, id).build();
        assert_eq!(grid.width, 4);
        assert_eq!(grid.height, 2);
        assert!(grid.cells.iter().all(|row| row.len() == 4));
        assert!(grid.cell(1, 2).is_empty());
        assert!(grid.cell(1, 3).is_empty());
        assert_eq!(grid.masks.base, vec![false, true]);
    }

    #[test]
    fn test_hidden_elements_are_filtered() {
        let (tree, side) = side_tree(vec![
            SourceElement::new("a", "A"),
            SourceElement::new("b", "B").hidden(),
            SourceElement::new("c", "C"),
        ]);
        let grid = BannerBuilder::new(&tree, side).build();

        assert_eq!(grid.masks.visibility, vec![true, false, true]);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.cell(1, 1).label, "C");
    }

    #[test]
    fn test_axis_label_kept_under_new_outer_category() {
        let (tree, side) = nested_tree();
        let grid = BannerBuilder::new(&tree, side).build();

        assert_eq!(
            grid.labels(),
            vec![
                vec!["Gender", "Male", "Age", "Young"],
                vec!["", "", "", "Old"],
                vec!["", "Female", "Age", "Young"],
                vec!["", "", "", "Old"],
            ]
        );
    }

    #[test]
    fn test_run_boundaries() {
        let (tree, side) = nested_tree();
        let grid = BannerBuilder::new(&tree, side).build();

        // inner axis column starts a new run when the outer element changes
        let firsts: Vec<bool> = (0..4).map(|r| grid.cell(r, 2).first).collect();
        assert_eq!(firsts, vec![true, false, true, false]);
        let lasts: Vec<bool> = (0..4).map(|r| grid.cell(r, 2).last).collect();
        assert_eq!(lasts, vec![false, true, false, true]);

        // outer axis column is one run
        assert!(grid.cell(0, 0).first && !grid.cell(1, 0).first);
        assert!(grid.cell(3, 0).last && !grid.cell(2, 0).last);

        assert_eq!(grid.masks.first, vec![true, true, true, true]);
        assert_eq!(grid.masks.last, vec![true, true, true, true]);
    }

    #[test]
    fn test_replicated_rows_continue_the_run() {
        let (tree, side) = side_tree(vec![SourceElement::new("a", "A"), SourceElement::new("b", "B")]);
        let items = vec![CellItem::new("Count", 0, 0), CellItem::new("ColPercent", 1, 1)];
        let grid = BannerBuilder::new(&tree, side).cell_items(&items).build();

        // the second statistic row of a category is neither first nor last
        assert_eq!(grid.masks.first, vec![true, false, true, false]);
        assert_eq!(grid.masks.last, vec![false, true, false, true]);
        assert!(!grid.cell(1, 0).first && !grid.cell(1, 0).last);
    }

    #[test]
    fn test_singleton_rows_are_first_and_last() {
        let (tree, side) = side_tree(vec![SourceElement::new("a", "A")]);
        let grid = BannerBuilder::new(&tree, side).build();
        assert!(grid.cell(0, 0).first && grid.cell(0, 0).last);
        assert!(grid.cell(0, 1).first && grid.cell(0, 1).last);
    }

    #[test]
    fn test_last_element_mask_is_deepest() {
        let (tree, side) = nested_tree();
        let grid = BannerBuilder::new(&tree, side).build();
        let names: Vec<String> = grid
            .masks
            .last_element
            .iter()
            .map(|e| tree.element(e.unwrap()).full_name.clone())
            .collect();
        assert_eq!(names, vec!["y", "o", "y", "o"]);
    }

    #[test]
    fn test_top_banner_is_transposed() {
        let top = SourceAxis::new("Top", "Brand").with_elements(vec![
            SourceElement::new("x", "X"),
            SourceElement::new("y", "Y"),
            SourceElement::new("z", "Z"),
        ]);
        let tree = AxisTree::build(&[top]).unwrap();
        let id = tree.root_named("Top").unwrap();
        let grid = BannerBuilder::new(&tree, id).build();

        assert_eq!(grid.orientation, Orientation::Top);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.labels(), vec![vec!["Brand", "", ""], vec!["X", "Y", "Z"]]);
        // masks stay per header column
        assert_eq!(grid.header_count(), 3);
    }

    #[test]
    fn test_transpose_twice_restores_grid() {
        let (tree, side) = nested_tree();
        let grid = BannerBuilder::new(&tree, side).build();
        let mut twice = grid.clone();
        twice.transpose();
        assert_eq!((twice.height, twice.width), (4, 4));
        assert_eq!(twice.cell(1, 3).target, grid.cell(3, 1).target);
        twice.transpose();
        assert_eq!(twice, grid);
    }

    #[test]
    fn test_no_cell_items_yields_empty_cell_item_mask() {
        let (tree, side) = side_tree(vec![SourceElement::new("a", "A")]);
        let grid = BannerBuilder::new(&tree, side).build();
        assert_eq!(grid.scaling_factor, 1);
        assert!(grid.masks.cell_items.is_empty());
    }
}
