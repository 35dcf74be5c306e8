//! FILENAME: core/tom-core/src/number_format.rs
//! PURPOSE: Number format hints handed to renderers.
//! CONTEXT: The engine never styles cells itself. It only says how many
//! decimals a data cell should show and whether it is a percentage; this
//! module turns that into an Excel-style format code and a display string.

use serde::{Deserialize, Serialize};

/// How a numeric data cell should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormatHint {
    pub decimals: u32,
    pub percent: bool,
}

impl NumberFormatHint {
    pub fn new(decimals: u32, percent: bool) -> Self {
        NumberFormatHint { decimals, percent }
    }

    /// Excel-style format code: "0", "0.00", "0.0%".
    pub fn code(&self) -> String {
        let mut code = String::from("0");
        if self.decimals > 0 {
            code.push('.');
            code.push_str(&"0".repeat(self.decimals as usize));
        }
        if self.percent {
            code.push('%');
        }
        code
    }

    /// Formats a value the way the format code would display it.
    pub fn format(&self, value: f64) -> String {
        let prec = self.decimals as usize;
        if self.percent {
            format!("{:.prec$}%", value * 100.0, prec = prec)
        } else {
            format!("{:.prec$}", value, prec = prec)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(NumberFormatHint::new(0, false).code(), "0");
        assert_eq!(NumberFormatHint::new(2, false).code(), "0.00");
        assert_eq!(NumberFormatHint::new(1, true).code(), "0.0%");
        assert_eq!(NumberFormatHint::new(0, true).code(), "0%");
    }

    #[test]
    fn test_format() {
        assert_eq!(NumberFormatHint::new(0, false).format(12.0), "12");
        assert_eq!(NumberFormatHint::new(2, false).format(12.5), "12.50");
        assert_eq!(NumberFormatHint::new(1, true).format(0.456), "45.6%");
    }
}
