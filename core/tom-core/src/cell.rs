//! FILENAME: core/tom-core/src/cell.rs
//! PURPOSE: Defines the value a single output cell can hold.
//! CONTEXT: Raw table values arrive as strings. Before they reach a renderer
//! they are converted with `parse_numeric`, which keeps anything it cannot
//! read as a number untouched.

use serde::{Deserialize, Serialize};

/// Represents the content of one cell of a resolved table grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the numeric content, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(n) => Some(*n as f64),
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

// ============================================================================
// NUMERIC PARSING
// ============================================================================

/// Knobs for `parse_numeric_with`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericOptions {
    /// When true, `"45%"` parses to 0.45. When false it stays text.
    pub percent_scaling: bool,
}

impl Default for NumericOptions {
    fn default() -> Self {
        NumericOptions {
            percent_scaling: true,
        }
    }
}

/// Parses a raw cell string with the default options.
///
/// - `"123"` -> `Integer(123)`
/// - `"12.5"` / `"12,5"` -> `Number(12.5)`
/// - `"45%"` -> `Number(0.45)`
/// - anything else is returned unchanged as `Text`.
pub fn parse_numeric(raw: &str) -> CellValue {
    parse_numeric_with(raw, &NumericOptions::default())
}

/// Parses a raw cell string. Never fails: unreadable input comes back as `Text`.
pub fn parse_numeric_with(raw: &str, options: &NumericOptions) -> CellValue {
    if is_all_digits(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return CellValue::Integer(n);
        }
        // Too long for i64, still a plain number.
        if let Ok(n) = raw.parse::<f64>() {
            return CellValue::Number(n);
        }
    }

    if let Some(n) = parse_decimal(raw) {
        return CellValue::Number(n);
    }

    if options.percent_scaling {
        if let Some(body) = raw.strip_suffix('%') {
            if let Some(n) = parse_decimal(body) {
                return CellValue::Number(n / 100.0);
            }
        }
    }

    CellValue::Text(raw.to_string())
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Reads digits with at most one ',' and at most one '.'.
///
/// A lone comma is the decimal point. With both present, whichever comes last
/// is the decimal point and the other is a grouping separator. A lone period is
/// always a decimal point, so "1.234" reads as 1.234.
fn parse_decimal(s: &str) -> Option<f64> {
    let mut digits = 0usize;
    let mut comma = None;
    let mut dot = None;

    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => digits += 1,
            ',' if comma.is_none() => comma = Some(i),
            '.' if dot.is_none() => dot = Some(i),
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }

    let normalized = match (comma, dot) {
        (None, _) => s.to_string(),
        (Some(_), None) => s.replacen(',', ".", 1),
        (Some(c), Some(d)) if c < d => s.replacen(',', "", 1),
        (Some(_), Some(_)) => s.replacen('.', "", 1).replacen(',', ".", 1),
    };

    normalized.parse::<f64>().ok()
}
