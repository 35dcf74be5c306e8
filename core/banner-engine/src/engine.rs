//! FILENAME: core/banner-engine/src/engine.rs
//! Banner Engine - The pipeline that turns a source table into a TableView.
//!
//! Algorithm:
//! 1. Build and resolve the axis tree (fails on unresolvable headings)
//! 2. Build the Side banner (replicated per cell item) and the Top banner
//! 3. Verticalize raw values and filter them with both visibility masks
//! 4. Detect banner merge ranges
//! 5. Lay out the sections and collect formatting hints
//!
//! Tables never share state, so a document's tables can be calculated
//! independently (in parallel with the `parallel` feature). Output order
//! always follows the document.

use serde::{Deserialize, Serialize};
use tom_core::NumericOptions;

use crate::banner::{BannerBuilder, BannerGrid};
use crate::data::{build_data_matrix, DataMatrix};
use crate::definition::{SourceDocument, SourceTable, SIDE_AXIS, TOP_AXIS};
use crate::error::BannerResult;
use crate::hints::{banner_hints, data_hints};
use crate::layout::{compute_layout, LayoutOptions, SectionSizes};
use crate::logging::{log_enter, log_exit, log_info, log_warn};
use crate::merge::detect_merge_ranges;
use crate::model::AxisTree;
use crate::view::TableView;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutOptions,
    pub numeric: NumericOptions,
    /// Calculate tables on the rayon pool. Needs the `parallel` feature.
    pub parallel: bool,
}

// ============================================================================
// TABLE CALCULATOR
// ============================================================================

pub struct TableCalculator<'a> {
    table: &'a SourceTable,
    index: usize,
    config: &'a EngineConfig,
}

impl<'a> TableCalculator<'a> {
    pub fn new(table: &'a SourceTable, index: usize, config: &'a EngineConfig) -> Self {
        TableCalculator {
            table,
            index,
            config,
        }
    }

    pub fn calculate(&self) -> BannerResult<TableView> {
        let table = self.table;

        // Step 1: Resolve the tree
        let model = AxisTree::build(&table.axes)?;

        // Step 2: Banners
        let side_banner = model.root_named(SIDE_AXIS).map(|id| {
            BannerBuilder::new(&model, id)
                .cell_items(&table.cell_items)
                .build()
        });
        let top_banner = model
            .root_named(TOP_AXIS)
            .map(|id| BannerBuilder::new(&model, id).build());

        // Step 3: Data
        let data = build_data_matrix(
            &table.cell_values,
            table.cell_items.len().max(1),
            side_banner.as_ref(),
            top_banner.as_ref(),
            &self.config.numeric,
        )?;

        // Step 4: Merges
        let side_merges = side_banner.as_ref().map(detect_merge_ranges).unwrap_or_default();
        let top_merges = top_banner.as_ref().map(detect_merge_ranges).unwrap_or_default();

        // Step 5: Layout and hints
        let (top_annotations, bottom_annotations) = self.split_annotations();
        let back_reference = self.config.layout.back_reference.clone();
        let sizes = SectionSizes {
            top_annotations: top_annotations.len() as u32,
            back_reference: back_reference.is_some(),
            top_banner: banner_size(top_banner.as_ref()),
            side_banner: banner_size(side_banner.as_ref()),
            data: data_size(&data),
            bottom_annotations: bottom_annotations.len() as u32,
        };
        let layout = compute_layout(&sizes, &self.config.layout);

        let show_percent_signs = table.show_percent_signs();
        let side_hints = side_banner
            .as_ref()
            .map(|b| banner_hints(&model, b))
            .unwrap_or_default();
        let top_hints = top_banner
            .as_ref()
            .map(|b| banner_hints(&model, b))
            .unwrap_or_default();
        let data_hints = data_hints(
            &model,
            side_banner.as_ref(),
            top_banner.as_ref(),
            show_percent_signs,
            data.height(),
            data.width(),
        );

        Ok(TableView {
            index: self.index,
            name: table.name.clone(),
            description: table.description.clone(),
            is_populated: table.is_populated,
            show_percent_signs,
            model,
            layout,
            top_annotations,
            back_reference,
            top_banner,
            side_banner,
            data,
            bottom_annotations,
            top_merges,
            side_merges,
            top_hints,
            side_hints,
            data_hints,
        })
    }

    /// Leading annotations go on top, the rest below. Blank ones are dropped
    /// after the split so placeholders still count towards the top slots.
    fn split_annotations(&self) -> (Vec<String>, Vec<String>) {
        let limit = self.config.layout.top_annotation_limit;
        let keep = |a: &&String| !a.is_empty();
        let top = self.table.annotations.iter().take(limit).filter(keep).cloned().collect();
        let bottom = self.table.annotations.iter().skip(limit).filter(keep).cloned().collect();
        (top, bottom)
    }
}

fn banner_size(banner: Option<&BannerGrid>) -> (u32, u32) {
    banner.map_or((0, 0), |b| (b.height as u32, b.width as u32))
}

fn data_size(data: &DataMatrix) -> (u32, u32) {
    (data.height() as u32, data.width() as u32)
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates the view of one table. `index` is its 1-based document position.
pub fn calculate_table(table: &SourceTable, index: usize, config: &EngineConfig) -> BannerResult<TableView> {
    log_enter!("ENGINE", "calculate_table", "index={} name={}", index, table.name);
    let result = TableCalculator::new(table, index, config).calculate();
    match &result {
        Ok(view) => log_exit!("ENGINE", "calculate_table", "index={} layout={:?}", index, view.layout.extent()),
        Err(e) => log_warn!("ENGINE", "table {} '{}' failed: {}", index, table.name, e),
    }
    result
}

/// Calculates every table of a document. One result per table, in document
/// order; a failing table does not stop the others.
pub fn calculate_document(document: &SourceDocument, config: &EngineConfig) -> Vec<BannerResult<TableView>> {
    log_info!("ENGINE", "calculating {} tables", document.tables.len());
    run_tables(&document.tables, config)
}

#[cfg(feature = "parallel")]
fn run_tables(tables: &[SourceTable], config: &EngineConfig) -> Vec<BannerResult<TableView>> {
    use rayon::prelude::*;

    if config.parallel {
        tables
            .par_iter()
            .enumerate()
            .map(|(i, table)| calculate_table(table, i + 1, config))
            .collect()
    } else {
        sequential(tables, config)
    }
}

#[cfg(not(feature = "parallel"))]
fn run_tables(tables: &[SourceTable], config: &EngineConfig) -> Vec<BannerResult<TableView>> {
    if config.parallel {
        log_warn!("ENGINE", "parallel requested but the `parallel` feature is off");
    }
    sequential(tables, config)
}

fn sequential(tables: &[SourceTable], config: &EngineConfig) -> Vec<BannerResult<TableView>> {
    tables
        .iter()
        .enumerate()
        .map(|(i, table)| calculate_table(table, i + 1, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::SourceTable;

    #[test]
    fn test_split_annotations_keeps_placeholders_in_top_slots() {
        let mut table = SourceTable::new("T");
        table.annotations = ["Title", "", "", "", "Note", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let config = EngineConfig::default();
        let (top, bottom) = TableCalculator::new(&table, 1, &config).split_annotations();
        assert_eq!(top, vec!["Title"]);
        assert_eq!(bottom, vec!["Note"]);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"layout": {"separator_rows": 2}}"#).unwrap();
        assert_eq!(config.layout.separator_rows, 2);
        assert_eq!(config.layout.top_annotation_limit, 4);
        assert!(config.numeric.percent_scaling);
        assert!(!config.parallel);
    }
}
