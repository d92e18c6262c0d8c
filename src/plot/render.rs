use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::TextStyle;

use super::figure::Figure;
use crate::color::to_rgb;
use crate::error::PlotError;

const MARGIN: u32 = 20;
const X_LABEL_AREA: u32 = 50;
/// Width reserved left of the axis for tick labels.
const Y_TICK_AREA: u32 = 60;
/// Extra width left of the tick labels for a y-axis title.
const Y_TITLE_AREA: u32 = 110;

/// Pixel anchors of the axis titles for a plotting area spanning
/// `x_px` × `y_px`: the x title hangs right-aligned under the right end of
/// the axis, below the tick labels; the y title hangs right-aligned from the
/// top of the axis, left of the tick labels.
pub(crate) fn axis_title_anchors(
    x_px: &Range<i32>,
    y_px: &Range<i32>,
    tick_px: i32,
) -> ((i32, i32), (i32, i32)) {
    let x_title = (x_px.end, y_px.end + 2 * tick_px);
    let y_title = (x_px.start - Y_TICK_AREA as i32, y_px.start);
    (x_title, y_title)
}

impl Figure {
    /// Render the figure to `path`. The backend is chosen by extension:
    /// `.png` (bitmap) or `.svg`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "png" => {
                let root = BitMapBackend::new(path, self.size).into_drawing_area();
                self.draw(&root)?;
                root.present()
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            "svg" => {
                let root = SVGBackend::new(path, self.size).into_drawing_area();
                self.draw(&root)?;
                root.present()
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            other => return Err(PlotError::UnsupportedExtension(other.to_string()).into()),
        }

        info!("Saved figure with {} series to {}", self.series.len(), path.display());
        Ok(())
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let style = &self.style;
        let bounds = self.bounds();
        let label_font = (style.font_family, style.px(style.label_size)).into_font();
        let tick_font = if self.styled_ticks {
            (style.font_family, style.px(style.tick_size)).into_font()
        } else {
            ("sans-serif", style.px(style.tick_size)).into_font()
        };

        root.fill(&WHITE)?;

        let y_label_area = if self.axis_labels.is_some() {
            Y_TICK_AREA + Y_TITLE_AREA
        } else {
            Y_TICK_AREA
        };

        let mut chart = ChartBuilder::on(root)
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(bounds.x.clone(), bounds.y.clone())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .label_style(tick_font)
            .draw()?;

        let band_style = to_rgb(style.band_color).filled();
        let line_style = to_rgb(style.line_color).stroke_width(style.line_width);

        for series in &self.series {
            chart.draw_series(std::iter::once(Polygon::new(
                series.band_outline(style.band_width),
                band_style,
            )))?;

            chart.draw_series(LineSeries::new(
                series.mean.iter().enumerate().map(|(i, &m)| (i as f64, m)),
                line_style,
            ))?;

            if let Some(anchor) = series.label_anchor(style) {
                let vpos = if anchor.above { VPos::Bottom } else { VPos::Top };
                let text_style = TextStyle::from(label_font.clone()).pos(Pos::new(HPos::Right, vpos));
                chart.draw_series(std::iter::once(Text::new(
                    series.label.clone(),
                    (anchor.x, anchor.y),
                    text_style,
                )))?;
            }
        }

        if let Some(labels) = &self.axis_labels {
            let (x_px, y_px) = chart.plotting_area().get_pixel_range();
            let tick_px = style.px(style.tick_size) as i32;
            let (x_anchor, y_anchor) = axis_title_anchors(&x_px, &y_px, tick_px);
            let title_style = TextStyle::from(label_font).pos(Pos::new(HPos::Right, VPos::Top));

            root.draw(&Text::new(labels.x.clone(), x_anchor, title_style.clone()))?;
            root.draw(&Text::new(labels.y.clone(), y_anchor, title_style))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_title_hangs_from_axis_top_left_of_ticks() {
        let (x_title, y_title) = axis_title_anchors(&(200..780), &(30..550), 12);
        // top edge level with the top of the axis, not above it
        assert_eq!(y_title.1, 30);
        // right edge clear of the tick-label column
        assert_eq!(y_title.0, 200 - Y_TICK_AREA as i32);
        assert_eq!(x_title, (780, 574));
    }
}
