//! FILENAME: core/banner-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BannerError {
    #[error("Element heading '{path}' on axis '{axis}' matches no element")]
    UnresolvedHeading { axis: String, path: String },

    #[error("Element heading '{path}' on axis '{axis}' matches {count} elements")]
    AmbiguousHeading {
        axis: String,
        path: String,
        count: usize,
    },

    #[error("Cell value row {row} has {found} values, not a multiple of {expected} cell items")]
    RaggedCellValues {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Data shape mismatch: {0}")]
    DataShapeMismatch(String),
}

pub type BannerResult<T> = Result<T, BannerError>;
