use std::ops::Range;

use super::style::PlotStyle;
use crate::error::PlotError;

// ---------------------------------------------------------------------------
// Drawing commands
// ---------------------------------------------------------------------------

/// A mean curve with its standard error, drawn as a line over a band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSeries {
    pub label: String,
    pub mean: Vec<f64>,
    pub stderr: Vec<f64>,
    /// Draw the label above the curve instead of below.
    pub above: bool,
}

/// Where a series label is drawn, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub above: bool,
}

impl BandSeries {
    /// `mean + k * stderr` for every step.
    pub fn upper(&self, k: f64) -> Vec<f64> {
        self.mean.iter().zip(&self.stderr).map(|(m, s)| m + k * s).collect()
    }

    /// `mean - k * stderr` for every step.
    pub fn lower(&self, k: f64) -> Vec<f64> {
        self.mean.iter().zip(&self.stderr).map(|(m, s)| m - k * s).collect()
    }

    /// Closed outline of the band: upper edge left to right, then the lower
    /// edge right to left.
    pub fn band_outline(&self, k: f64) -> Vec<(f64, f64)> {
        let upper = self.upper(k);
        let lower = self.lower(k);
        let forward = upper.iter().enumerate().map(|(i, &y)| (i as f64, y));
        let backward = lower.iter().enumerate().rev().map(|(i, &y)| (i as f64, y));
        forward.chain(backward).collect()
    }

    /// Label position: `label_inset` steps before the end of the series
    /// (the first step for shorter series), offset from the mean by
    /// `label_offset` standard errors. `None` for an empty series.
    pub fn label_anchor(&self, style: &PlotStyle) -> Option<LabelAnchor> {
        if self.mean.is_empty() {
            return None;
        }
        let x = self.mean.len().saturating_sub(style.label_inset);
        let offset = style.label_offset * self.stderr[x];
        let y = if self.above {
            self.mean[x] + offset
        } else {
            self.mean[x] - offset
        };
        Some(LabelAnchor {
            x: x as f64,
            y,
            above: self.above,
        })
    }
}

/// Axis titles set by [`Figure::set_labels`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

/// Data ranges covered by a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

// ---------------------------------------------------------------------------
// Figure – explicit plotting context
// ---------------------------------------------------------------------------

/// Collects series and axis styling, then renders them in one go with
/// [`Figure::save`].
#[derive(Debug, Clone)]
pub struct Figure {
    pub(crate) style: PlotStyle,
    pub(crate) series: Vec<BandSeries>,
    pub(crate) axis_labels: Option<AxisLabels>,
    pub(crate) styled_ticks: bool,
    pub(crate) size: (u32, u32),
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl Figure {
    pub fn new() -> Self {
        Self {
            style: PlotStyle::default(),
            series: Vec::new(),
            axis_labels: None,
            styled_ticks: false,
            size: (800, 600),
        }
    }

    /// Output size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn series(&self) -> &[BandSeries] {
        &self.series
    }

    /// Add a mean curve over a `±band_width` standard error band, labelled
    /// near its right end.
    pub fn plot_results(
        &mut self,
        mean: &[f64],
        stderr: &[f64],
        label: &str,
        above: bool,
    ) -> Result<(), PlotError> {
        if mean.len() != stderr.len() {
            return Err(PlotError::LengthMismatch {
                label: label.to_string(),
                mean: mean.len(),
                stderr: stderr.len(),
            });
        }
        self.series.push(BandSeries {
            label: label.to_string(),
            mean: mean.to_vec(),
            stderr: stderr.to_vec(),
            above,
        });
        Ok(())
    }

    /// Set the axis titles: x at the right end of the x axis, y horizontal
    /// at the top of the y axis.
    pub fn set_labels(&mut self, xtext: &str, ytext: &str) {
        self.axis_labels = Some(AxisLabels {
            x: xtext.to_string(),
            y: ytext.to_string(),
        });
    }

    /// Draw tick labels in the style's font at `tick_size`.
    pub fn set_tick_style(&mut self) {
        self.styled_ticks = true;
    }

    /// Ranges that cover every band and label, padded by 5%.
    pub fn bounds(&self) -> Bounds {
        let k = self.style.band_width;
        let x_max = self
            .series
            .iter()
            .map(|s| s.mean.len().saturating_sub(1))
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in &self.series {
            let labels = s.label_anchor(&self.style).map(|a| a.y);
            let values = s.upper(k).into_iter().chain(s.lower(k)).chain(labels);
            for v in values.filter(|v| v.is_finite()) {
                y_min = y_min.min(v);
                y_max = y_max.max(v);
            }
        }

        let y = if y_min > y_max {
            0.0..1.0
        } else if (y_max - y_min).abs() < f64::EPSILON {
            (y_min - 1.0)..(y_max + 1.0)
        } else {
            let pad = (y_max - y_min) * 0.05;
            (y_min - pad)..(y_max + pad)
        };

        Bounds { x: 0.0..x_max, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: usize, above: bool) -> BandSeries {
        BandSeries {
            label: "s".into(),
            mean: (0..len).map(|i| i as f64).collect(),
            stderr: vec![1.0; len],
            above,
        }
    }

    #[test]
    fn label_sits_inset_from_the_end() {
        let style = PlotStyle::default();
        let below = series(100, false).label_anchor(&style).unwrap();
        assert_eq!(below.x, 80.0);
        assert_eq!(below.y, 80.0 - 2.5);

        let above = series(100, true).label_anchor(&style).unwrap();
        assert_eq!(above.y, 80.0 + 2.5);
        assert!(above.above);
    }

    #[test]
    fn label_clamps_for_short_series() {
        let style = PlotStyle::default();
        let a = series(5, true).label_anchor(&style).unwrap();
        assert_eq!(a.x, 0.0);
        assert!(series(0, true).label_anchor(&style).is_none());
    }

    #[test]
    fn band_outline_is_closed_loop() {
        let s = series(3, false);
        let outline = s.band_outline(2.0);
        assert_eq!(
            outline,
            vec![(0.0, 2.0), (1.0, 3.0), (2.0, 4.0), (2.0, 0.0), (1.0, -1.0), (0.0, -2.0)]
        );
    }

    #[test]
    fn plot_results_rejects_mismatched_lengths() {
        let mut fig = Figure::new();
        assert!(fig.plot_results(&[1.0, 2.0], &[0.1], "bad", false).is_err());
        assert!(fig.plot_results(&[1.0, 2.0], &[0.1, 0.1], "ok", true).is_ok());
        assert_eq!(fig.series().len(), 1);
        assert_eq!(fig.series()[0].label, "ok");
    }

    #[test]
    fn bounds_cover_band_and_label() {
        let mut fig = Figure::new();
        fig.plot_results(&[0.0; 50], &[1.0; 50], "flat", true).unwrap();
        let b = fig.bounds();
        assert_eq!(b.x, 0.0..49.0);
        // band spans [-2, 2], label sits at 2.5
        assert!(b.y.start < -2.0);
        assert!(b.y.end > 2.5);
    }

    #[test]
    fn bounds_of_empty_or_flat_figures() {
        let fig = Figure::new();
        assert_eq!(fig.bounds().y, 0.0..1.0);

        let mut flat = Figure::new();
        flat.plot_results(&[3.0, 3.0], &[0.0, 0.0], "c", false).unwrap();
        assert_eq!(flat.bounds().y, 2.0..4.0);
    }

    #[test]
    fn labels_and_ticks_are_recorded() {
        let mut fig = Figure::new();
        fig.set_labels("Episode", "Return");
        fig.set_tick_style();
        assert_eq!(fig.axis_labels.as_ref().unwrap().x, "Episode");
        assert!(fig.styled_ticks);
    }
}
