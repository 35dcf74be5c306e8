//! FILENAME: tests/common/mod.rs
//! Fixtures for banner engine integration tests.

#![allow(dead_code)]

use banner_engine::{CellItem, SourceAxis, SourceDocument, SourceElement, SourceTable, TableProperty};

/// Gender (side) by brand (top) with Count and ColPercent per cell.
///
/// Side banner 4x2, top banner 2x2, data 4x2.
pub fn gender_by_brand() -> SourceTable {
    let mut table = SourceTable::new("Gender by brand");
    table.description = "Q1 x Q7".to_string();
    table.is_populated = true;
    table.axes = vec![
        SourceAxis::new("Side", "Gender")
            .with_elements(vec![SourceElement::new("m", "Male"), SourceElement::new("f", "Female")]),
        SourceAxis::new("Top", "Brand")
            .with_elements(vec![SourceElement::new("a", "A"), SourceElement::new("b", "B")]),
    ];
    table.cell_items = vec![CellItem::new("Count", 0, 0), CellItem::new("ColPercent", 1, 1)];
    table.annotations = strings(&["Gender by brand", "", "Base: all", "", "Source: survey"]);
    table.cell_values = vec![
        strings(&["10", "25%", "20", "75%"]),
        strings(&["30", "50%", "40", "60%"]),
    ];
    table.properties = vec![TableProperty {
        name: "ShowPercentSigns".to_string(),
        value: "-1".to_string(),
    }];
    table
}

/// Side axis with a nested Age sub-axis and a hidden top column.
pub fn nested_with_hidden_column() -> SourceTable {
    let age = SourceAxis::new("Age", "Age")
        .with_elements(vec![SourceElement::new("y", "Young"), SourceElement::new("o", "Old")]);
    let side = SourceAxis::new("Side", "Gender")
        .with_elements(vec![SourceElement::new("m", "Male"), SourceElement::new("f", "Female")])
        .with_sub_axis(age);
    let top = SourceAxis::new("Top", "Brand").with_elements(vec![
        SourceElement::base("all", "All"),
        SourceElement::new("x", "X").hidden(),
        SourceElement::new("z", "Z"),
    ]);

    let mut table = SourceTable::new("Nested");
    table.axes = vec![side, top];
    table.cell_values = vec![
        strings(&["1", "2", "3"]),
        strings(&["4", "5", "6"]),
        strings(&["7", "8", "9"]),
        strings(&["10", "11", "12"]),
    ];
    table
}

/// A two-table document; the second table references a missing element.
pub const DOCUMENT_JSON: &str = r#"{
    "tables": [
        {
            "name": "Awareness",
            "axes": [
                {
                    "name": "Side",
                    "label": "Region",
                    "elements": [
                        {"name": "n", "label": "North", "decimals": 1},
                        {"name": "s", "label": "South"}
                    ],
                    "element_headings": [{"name": "n"}, {"name": "s"}]
                },
                {
                    "name": "Top",
                    "label": "Total",
                    "elements": [{"name": "t", "label": "Total", "type": "Base"}],
                    "element_headings": [{"name": "t"}]
                }
            ],
            "cell_items": [{"type": "Count", "index": 0}],
            "annotations": ["Awareness"],
            "cell_values": [["12,5"], ["7"]]
        },
        {
            "name": "Broken",
            "axes": [
                {
                    "name": "Side",
                    "label": "Region",
                    "elements": [{"name": "n", "label": "North"}],
                    "element_headings": [{"name": "missing"}]
                }
            ]
        }
    ]
}"#;

pub fn document() -> SourceDocument {
    serde_json::from_str(DOCUMENT_JSON).unwrap()
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
