use eframe::egui::Color32;

use crate::color::{BAND_FILL, MEAN_LINE};

/// Drawing constants for figures. Font sizes are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub font_family: &'static str,
    pub label_size: f64,
    pub tick_size: f64,
    /// Half-width of the shaded band, in standard errors.
    pub band_width: f64,
    /// Vertical offset of a series label from its mean, in standard errors.
    pub label_offset: f64,
    /// Label x position, counted back from the end of the series.
    pub label_inset: usize,
    pub line_width: u32,
    pub band_color: Color32,
    pub line_color: Color32,
    pub dpi: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            font_family: "serif",
            label_size: 10.0,
            tick_size: 9.0,
            band_width: 2.0,
            label_offset: 2.5,
            label_inset: 20,
            line_width: 2,
            band_color: BAND_FILL,
            line_color: MEAN_LINE,
            dpi: 100.0,
        }
    }
}

impl PlotStyle {
    /// Convert a point size to pixels at the style's resolution.
    pub fn px(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}
