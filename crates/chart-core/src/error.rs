// File: crates/chart-core/src/error.rs
// Summary: Error type shared by record loading, SVG writing and row export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing into the in-memory SVG buffer failed.
    #[error("svg write failed")]
    Svg(#[from] std::fmt::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid value '{value}' in column '{column}' (row {row})")]
    InvalidValue { column: &'static str, row: usize, value: String },

    #[error("there are no rows to export")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, ChartError>;
