//! FILENAME: core/banner-engine/src/lib.rs
//! Banner & layout engine for market-research crosstab tables.
//!
//! Turns a table object model (nested axes, elements, cell items and raw
//! cell values) into a resolved rectangular grid: side and top header
//! banners, a numeric data block, merge ranges and formatting hints, all
//! positioned on a sheet. Writing an actual file is left to a `Renderer`.
//!
//! Layers:
//! - `definition`: Serializable input (what the table IS)
//! - `model`: Resolved axis/element/heading tree with nested paths
//! - `banner`: Header grid construction for one axis
//! - `data`: Raw value verticalization, filtering and parsing
//! - `merge`: Banner merge range detection
//! - `layout`: Section placement on the sheet
//! - `hints`: Formatting hints for renderers
//! - `view`: Renderable output (WHAT we display)
//! - `engine`: Calculation pipeline (HOW we calculate)
//! - `render`: Renderer seam and the in-memory sheet renderer

pub mod logging;

pub mod banner;
pub mod data;
pub mod definition;
pub mod engine;
pub mod error;
pub mod hints;
pub mod layout;
pub mod merge;
pub mod model;
pub mod render;
pub mod view;

pub use banner::{BannerBuilder, BannerCell, BannerGrid, CellTarget, Orientation};
pub use data::{build_data_matrix, verticalize, DataMatrix};
pub use definition::*;
pub use engine::{calculate_document, calculate_table, EngineConfig};
pub use error::{BannerError, BannerResult};
pub use hints::{BannerCellHint, BannerCellKind, DataCellHint};
pub use layout::{compute_layout, LayoutOptions, Section, SectionSizes, TableLayout};
pub use merge::detect_merge_ranges;
pub use model::{AxisId, AxisTree, ElementId, HeadingId, Path};
pub use render::{render_to_grid, Renderer, SheetWriter};
pub use view::TableView;
