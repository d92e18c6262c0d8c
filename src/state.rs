use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::color::SeriesColors;
use crate::data::loader::load_directory;
use crate::data::model::Summary;
use crate::data::stats::summarize;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Run directory currently shown (None until one is opened).
    pub directory: Option<PathBuf>,

    /// One summary per run sequence found in `directory`.
    pub summaries: Vec<Summary>,

    /// Names of the summaries drawn in the plot.
    pub visible: BTreeSet<String>,

    /// Colour per summary name.
    pub colors: SeriesColors,

    /// Draw the ±2 stderr band behind each mean.
    pub show_band: bool,

    /// Plot running totals with the cumulative stderr.
    pub cumulative: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            directory: None,
            summaries: Vec::new(),
            visible: BTreeSet::new(),
            colors: SeriesColors::default(),
            show_band: true,
            cumulative: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load and aggregate every run sequence in `dir`. Failures are kept as
    /// a status message and leave the current summaries untouched.
    pub fn open_directory(&mut self, dir: &Path) {
        match summarize_all(dir) {
            Ok(summaries) => {
                log::info!("Loaded {} run sets from {}", summaries.len(), dir.display());
                self.set_summaries(dir.to_path_buf(), summaries);
                if self.summaries.is_empty() {
                    self.status_message = Some(format!("No runs found in {}", dir.display()));
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", dir.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest freshly aggregated summaries; everything starts visible.
    pub fn set_summaries(&mut self, dir: PathBuf, summaries: Vec<Summary>) {
        self.colors = SeriesColors::new(summaries.iter().map(|s| s.name.as_str()));
        self.visible = summaries.iter().map(|s| s.name.clone()).collect();
        self.summaries = summaries;
        self.directory = Some(dir);
        self.status_message = None;
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.contains(name)
    }

    /// Show or hide one summary.
    pub fn toggle(&mut self, name: &str) {
        if !self.visible.remove(name) {
            self.visible.insert(name.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.visible = self.summaries.iter().map(|s| s.name.clone()).collect();
    }

    pub fn select_none(&mut self) {
        self.visible.clear();
    }

    /// Summaries currently drawn, in load order.
    pub fn visible_summaries(&self) -> impl Iterator<Item = &Summary> {
        self.summaries.iter().filter(|s| self.is_visible(&s.name))
    }

    /// Mean and stderr to draw for `summary` in the current mode.
    pub fn curve(&self, summary: &Summary) -> (Vec<f64>, Vec<f64>) {
        if self.cumulative {
            (summary.cumulative_mean(), summary.cumulative_stderr.clone())
        } else {
            (summary.mean.clone(), summary.stderr.clone())
        }
    }
}

fn summarize_all(dir: &Path) -> Result<Vec<Summary>> {
    load_directory(dir)?
        .iter()
        .map(|set| summarize(set).with_context(|| format!("aggregating {}", set.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str) -> Summary {
        Summary {
            name: name.into(),
            runs: 2,
            mean: vec![1.0, 2.0],
            stderr: vec![0.1, 0.2],
            cumulative_stderr: vec![0.1, 0.3],
        }
    }

    #[test]
    fn new_summaries_start_visible() {
        let mut state = AppState::default();
        state.status_message = Some("old".into());
        state.set_summaries(PathBuf::from("d"), vec![summary("a"), summary("b")]);
        assert!(state.is_visible("a") && state.is_visible("b"));
        assert!(state.status_message.is_none());
        assert_eq!(state.visible_summaries().count(), 2);
    }

    #[test]
    fn toggle_and_select() {
        let mut state = AppState::default();
        state.set_summaries(PathBuf::from("d"), vec![summary("a"), summary("b")]);
        state.toggle("a");
        assert!(!state.is_visible("a"));
        state.toggle("a");
        assert!(state.is_visible("a"));
        state.select_none();
        assert_eq!(state.visible_summaries().count(), 0);
        state.select_all();
        assert_eq!(state.visible_summaries().count(), 2);
    }

    #[test]
    fn cumulative_mode_switches_columns() {
        let mut state = AppState::default();
        let s = summary("a");
        assert_eq!(state.curve(&s), (vec![1.0, 2.0], vec![0.1, 0.2]));
        state.cumulative = true;
        assert_eq!(state.curve(&s), (vec![1.0, 3.0], vec![0.1, 0.3]));
    }

    #[test]
    fn missing_directory_sets_status() {
        let mut state = AppState::default();
        state.open_directory(Path::new("/definitely/not/a/run/dir"));
        assert!(state.status_message.is_some());
        assert!(state.directory.is_none());
    }
}
