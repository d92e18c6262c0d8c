use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::band_tint;
use crate::plot::{BandSeries, PlotStyle};
use crate::state::AppState;

/// Upper bound on band quads drawn per series.
const MAX_BAND_SEGMENTS: usize = 1000;

// ---------------------------------------------------------------------------
// Summary plot (central panel)
// ---------------------------------------------------------------------------

/// Render every visible summary as a mean line over its stderr band.
pub fn summary_plot(ui: &mut Ui, state: &AppState) {
    if state.summaries.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a run directory to view results  (File → Open directory…)");
        });
        return;
    }

    let style = PlotStyle::default();
    let (x_label, y_label) = if state.cumulative {
        ("Step", "Cumulative value")
    } else {
        ("Step", "Value")
    };

    Plot::new("summary_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for summary in state.visible_summaries() {
                let color = state.colors.color_for(&summary.name);
                let (mean, stderr) = state.curve(summary);
                let series = BandSeries {
                    label: summary.name.clone(),
                    mean,
                    stderr,
                    above: false,
                };

                if state.show_band {
                    for quad in band_quads(&series, style.band_width) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(quad))
                                .fill_color(band_tint(color))
                                .stroke(Stroke::NONE),
                        );
                    }
                }

                let points: PlotPoints = series
                    .mean
                    .iter()
                    .enumerate()
                    .map(|(i, &m)| [i as f64, m])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&summary.name)
                        .color(color)
                        .width(style.line_width as f32),
                );

                if let Some(anchor) = series.label_anchor(&style) {
                    let align = if anchor.above {
                        Align2::RIGHT_BOTTOM
                    } else {
                        Align2::RIGHT_TOP
                    };
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(anchor.x, anchor.y),
                            RichText::new(&summary.name).color(Color32::DARK_GRAY),
                        )
                        .anchor(align),
                    );
                }
            }
        });
}

/// Split a band into convex quads between consecutive (strided) steps.
fn band_quads(series: &BandSeries, k: f64) -> Vec<Vec<[f64; 2]>> {
    let upper = series.upper(k);
    let lower = series.lower(k);
    let n = upper.len();
    if n < 2 {
        return Vec::new();
    }

    let stride = (n / MAX_BAND_SEGMENTS).max(1);
    let mut quads = Vec::new();
    let mut i = 0;
    while i < n - 1 {
        let j = (i + stride).min(n - 1);
        let (x0, x1) = (i as f64, j as f64);
        quads.push(vec![
            [x0, lower[i]],
            [x1, lower[j]],
            [x1, upper[j]],
            [x0, upper[i]],
        ]);
        i = j;
    }
    quads
}
