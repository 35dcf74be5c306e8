//! FILENAME: core/banner-engine/src/data.rs
//! Data Matrix - Raw cell values aligned with the banners.
//!
//! A raw value row holds every statistic of one side category combination
//! interleaved: [c0s0, c0s1, c1s0, c1s1, ...] for columns c and cell items s.
//! Verticalizing splits it into one row per cell item so that the data rows
//! line up with the Side banner's replicated rows. Both banners' visibility
//! masks are then applied, and finally each string is parsed.

use serde::{Deserialize, Serialize};
use tom_core::{parse_numeric_with, CellValue, NumericOptions};

use crate::banner::BannerGrid;
use crate::error::{BannerError, BannerResult};
use crate::logging::log_debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataMatrix {
    pub rows: Vec<Vec<CellValue>>,
}

impl DataMatrix {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }
}

/// Splits each raw row into `scaling_factor` stride-sliced rows.
pub fn verticalize(raw: &[Vec<String>], scaling_factor: usize) -> BannerResult<Vec<Vec<String>>> {
    let stride = scaling_factor.max(1);
    let mut out = Vec::with_capacity(raw.len() * stride);
    for (row_index, row) in raw.iter().enumerate() {
        if row.len() % stride != 0 {
            return Err(BannerError::RaggedCellValues {
                row: row_index,
                expected: stride,
                found: row.len(),
            });
        }
        for offset in 0..stride {
            out.push(row.iter().skip(offset).step_by(stride).cloned().collect());
        }
    }
    Ok(out)
}

/// Builds the visible, parsed data matrix. A missing banner skips its filter;
/// a banner without any rows leaves nothing visible.
pub fn build_data_matrix(
    raw: &[Vec<String>],
    scaling_factor: usize,
    side: Option<&BannerGrid>,
    top: Option<&BannerGrid>,
    numeric: &NumericOptions,
) -> BannerResult<DataMatrix> {
    if raw.is_empty() {
        return Ok(DataMatrix::default());
    }

    let mut rows = verticalize(raw, scaling_factor)?;

    let no_headers = |banner: Option<&BannerGrid>| banner.is_some_and(|b| b.masks.visibility.is_empty());
    if no_headers(side) || no_headers(top) {
        log_debug!("DATA", "a banner has no rows, data section left empty");
        return Ok(DataMatrix::default());
    }

    if let Some(side) = side {
        let mask = &side.masks.visibility;
        if mask.len() != rows.len() {
            return Err(BannerError::DataShapeMismatch(format!(
                "{} data rows but the side banner has {} rows",
                rows.len(),
                mask.len()
            )));
        }
        rows = rows
            .into_iter()
            .zip(mask)
            .filter(|(_, visible)| **visible)
            .map(|(row, _)| row)
            .collect();
    }

    if let Some(top) = top {
        let mask = &top.masks.visibility;
        if let Some(bad) = rows.iter().position(|row| row.len() != mask.len()) {
            return Err(BannerError::DataShapeMismatch(format!(
                "data row {} has {} columns but the top banner has {}",
                bad,
                rows[bad].len(),
                mask.len()
            )));
        }
        rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(mask)
                    .filter(|(_, visible)| **visible)
                    .map(|(value, _)| value)
                    .collect()
            })
            .collect();
    }

    let matrix = DataMatrix {
        rows: rows
            .iter()
            .map(|row| row.iter().map(|s| parse_numeric_with(s, numeric)).collect())
            .collect(),
    };
    log_debug!(
        "DATA",
        "{} raw rows -> {}x{} visible cells",
        raw.len(),
        matrix.height(),
        matrix.width()
    );
    Ok(matrix)
}
