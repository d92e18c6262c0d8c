use serde::Serialize;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Table – the parsed content of one numeric text file
// ---------------------------------------------------------------------------

/// A rectangular block of numbers read from a whitespace-delimited file.
/// Values are stored row-major.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: usize,
    pub columns: usize,
    pub values: Vec<f64>,
}

impl Table {
    /// Value at `(row, column)`.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.columns + column]
    }

    /// Copy one column out of the table.
    pub fn column(&self, column: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, column)).collect()
    }

    /// Interpret the table as a one-dimensional series.
    ///
    /// A single column or a single row both count; an empty table is an
    /// empty series.
    pub fn into_series(self) -> Result<Vec<f64>, DataError> {
        if self.columns <= 1 || self.rows <= 1 {
            Ok(self.values)
        } else {
            Err(DataError::NotASeries {
                rows: self.rows,
                columns: self.columns,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// RunSet – every repetition of one experiment
// ---------------------------------------------------------------------------

/// All runs loaded from one `{name}-{n}.txt` sequence, in run order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSet {
    pub name: String,
    pub runs: Vec<Vec<f64>>,
}

impl RunSet {
    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether no run was found.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary – aggregated statistics across runs
// ---------------------------------------------------------------------------

/// Mean and standard errors of a [`RunSet`], one entry per time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub name: String,
    pub runs: usize,
    pub mean: Vec<f64>,
    pub stderr: Vec<f64>,
    pub cumulative_stderr: Vec<f64>,
}

/// One line of a summary, as written to CSV.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryRow {
    pub mean: f64,
    pub stderr: f64,
    pub cumulative_stderr: f64,
}

impl Summary {
    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = SummaryRow> + '_ {
        self.mean
            .iter()
            .zip(&self.stderr)
            .zip(&self.cumulative_stderr)
            .map(|((&mean, &stderr), &cumulative_stderr)| SummaryRow {
                mean,
                stderr,
                cumulative_stderr,
            })
    }

    /// Running total of the mean. Pairs with `cumulative_stderr`.
    pub fn cumulative_mean(&self) -> Vec<f64> {
        self.mean
            .iter()
            .scan(0.0, |acc, &v| {
                *acc += v;
                Some(*acc)
            })
            .collect()
    }
}
