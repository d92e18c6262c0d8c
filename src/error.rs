//! Error types shared by the data layer and the figure renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing run files or aggregating runs.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{path}: line {line}, field {field}: '{token}' is not a number")]
    BadNumber {
        path: PathBuf,
        line: usize,
        field: usize,
        token: String,
    },

    #[error("{path}: line {line} has {found} columns, expected {expected}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("table of {rows}x{columns} values is not a one-dimensional series")]
    NotASeries { rows: usize, columns: usize },

    #[error("summary table has {found} columns, expected 3")]
    SummaryShape { found: usize },

    #[error("run pattern '{0}' has no '{{}}' placeholder")]
    MissingPlaceholder(String),

    #[error("no runs to aggregate")]
    NoRuns,

    #[error("run {run} has {found} samples, expected {expected}")]
    LengthMismatch {
        run: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while building a figure.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("series '{label}': mean has {mean} values but stderr has {stderr}")]
    LengthMismatch {
        label: String,
        mean: usize,
        stderr: usize,
    },

    #[error("unsupported figure extension: .{0}")]
    UnsupportedExtension(String),
}
