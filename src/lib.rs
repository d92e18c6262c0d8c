//! Aggregate repeated experiment runs into mean / standard-error summaries
//! and plot them with shaded confidence bands.
//!
//! Runs are text files named `{name}-{n}.txt`, one numeric series each.
//! [`data`] loads and aggregates them, [`plot`] renders figures to disk, and
//! [`app`] hosts an interactive viewer.

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod plot;
pub mod state;
pub mod ui;

pub use data::loader::{load_directory, load_results, RunPattern};
pub use data::model::{RunSet, Summary, Table};
pub use data::stats::{aggregate_results, summarize};
pub use data::writer::{read_summary, summarize_directory, SummaryFormat};
pub use error::{DataError, PlotError};
pub use plot::Figure;
