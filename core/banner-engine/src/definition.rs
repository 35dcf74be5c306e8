//! FILENAME: core/banner-engine/src/definition.rs
//! Table Definition - The already-parsed source tree.
//!
//! This module contains all the types needed to DESCRIBE a table as the
//! parser hands it over. These structures are designed to be:
//! - Serializable (fixtures and parser output are plain JSON)
//! - Immutable snapshots of the source document
//!
//! Nothing here is resolved: element headings still refer to elements by
//! name, and cell values are raw strings.

use serde::{Deserialize, Serialize};

/// Name of the axis that becomes the row banner.
pub const SIDE_AXIS: &str = "Side";

/// Name of the axis that becomes the column banner.
pub const TOP_AXIS: &str = "Top";

/// Table property that switches percent number formats on.
pub const SHOW_PERCENT_SIGNS: &str = "ShowPercentSigns";

// ============================================================================
// DOCUMENT / TABLE
// ============================================================================

/// All tables of a source document, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub tables: Vec<SourceTable>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceTable {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub is_populated: bool,

    /// Root axes, usually "Side" and "Top".
    #[serde(default)]
    pub axes: Vec<SourceAxis>,

    /// Statistics shown per category combination (Count, Percent, ...).
    #[serde(default)]
    pub cell_items: Vec<CellItem>,

    /// Annotation texts in declaration order. Empty strings are placeholders.
    #[serde(default)]
    pub annotations: Vec<String>,

    /// Raw values of the first layer: one row per side category combination,
    /// one string per (top column x cell item) position.
    #[serde(default)]
    pub cell_values: Vec<Vec<String>>,

    #[serde(default)]
    pub properties: Vec<TableProperty>,
}

impl SourceTable {
    pub fn new(name: impl Into<String>) -> Self {
        SourceTable {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn axis(&self, name: &str) -> Option<&SourceAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    pub fn side_axis(&self) -> Option<&SourceAxis> {
        self.axis(SIDE_AXIS)
    }

    pub fn top_axis(&self) -> Option<&SourceAxis> {
        self.axis(TOP_AXIS)
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// "-1" is the source format's boolean true.
    pub fn show_percent_signs(&self) -> bool {
        self.property(SHOW_PERCENT_SIGNS) == Some("-1")
    }
}

/// A name/value pair from the table's property list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProperty {
    pub name: String,
    pub value: String,
}

// ============================================================================
// AXES / ELEMENTS / HEADINGS
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceAxis {
    pub name: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub sub_axes: Vec<SourceAxis>,

    #[serde(default)]
    pub elements: Vec<SourceElement>,

    /// Declared display order and subset. May contain duplicates.
    #[serde(default)]
    pub element_headings: Vec<SourceElementHeading>,
}

impl SourceAxis {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        SourceAxis {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    /// Adds elements and a matching flat heading for each of them.
    pub fn with_elements(mut self, elements: Vec<SourceElement>) -> Self {
        for e in &elements {
            self.element_headings.push(SourceElementHeading::from_element(e));
        }
        self.elements.extend(elements);
        self
    }

    pub fn with_sub_axis(mut self, axis: SourceAxis) -> Self {
        self.sub_axes.push(axis);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceElement {
    pub name: String,

    #[serde(default)]
    pub label: String,

    /// Type tag, e.g. "Base" or "Category". Absent for ordinary elements.
    #[serde(rename = "type", default)]
    pub element_type: String,

    #[serde(default)]
    pub decimals: u32,

    /// `None` when the attribute is missing, which means shown.
    #[serde(default)]
    pub shown_on_table: Option<bool>,

    #[serde(default)]
    pub sub_elements: Vec<SourceElement>,
}

impl SourceElement {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        SourceElement {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn base(name: impl Into<String>, label: impl Into<String>) -> Self {
        SourceElement {
            element_type: "Base".to_string(),
            ..SourceElement::new(name, label)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.shown_on_table = Some(false);
        self
    }

    pub fn with_sub_elements(mut self, sub_elements: Vec<SourceElement>) -> Self {
        self.sub_elements = sub_elements;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.shown_on_table.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceElementHeading {
    pub name: String,

    #[serde(default)]
    pub sub_headings: Vec<SourceElementHeading>,
}

impl SourceElementHeading {
    pub fn new(name: impl Into<String>) -> Self {
        SourceElementHeading {
            name: name.into(),
            sub_headings: Vec::new(),
        }
    }

    /// A heading tree mirroring an element tree.
    pub fn from_element(element: &SourceElement) -> Self {
        SourceElementHeading {
            name: element.name.clone(),
            sub_headings: element
                .sub_elements
                .iter()
                .map(SourceElementHeading::from_element)
                .collect(),
        }
    }
}

// ============================================================================
// CELL ITEMS
// ============================================================================

/// A statistic computed per category combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellItem {
    /// Statistic type, e.g. "Count", "ColPercent", "Base".
    #[serde(rename = "type")]
    pub item_type: String,

    #[serde(default)]
    pub decimals: u32,

    /// Position of this statistic inside a raw value row.
    #[serde(default)]
    pub index: u32,
}

impl CellItem {
    pub fn new(item_type: impl Into<String>, decimals: u32, index: u32) -> Self {
        CellItem {
            item_type: item_type.into(),
            decimals,
            index,
        }
    }

    pub fn is_percent(&self) -> bool {
        self.item_type.contains("Percent")
    }
}
