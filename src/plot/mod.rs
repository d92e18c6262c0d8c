/// Figure rendering: shaded-band line plots written to png or svg.
///
/// A [`Figure`] is built up with `plot_results`, `set_labels` and
/// `set_tick_style`, then rendered once by `save`.

pub mod figure;
pub mod render;
pub mod style;

pub use figure::{BandSeries, Figure, LabelAnchor};
pub use style::PlotStyle;
