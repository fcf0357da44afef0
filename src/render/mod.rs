pub mod bar_geometry;
mod frame;
pub mod legend;
mod null_renderer;
pub mod pie_geometry;
mod primitives;
mod scratch;

pub use bar_geometry::{BarRect, bar_bounds, highlight_rect, project_all_bar_rects, project_bar_rects};
pub use frame::RenderFrame;
pub use legend::{
    EstimatedTextMeasurer, LegendConfig, LegendForm, LegendItem, LegendPlacement, LegendRun,
    TextMeasurer, compute_legend, full_height, full_width, layout_legend, maximum_entry_length,
};
pub use null_renderer::NullRenderer;
pub use pie_geometry::{PieLayout, SliceArc, SliceLabel, project_slices, slice_gap_angle, slice_labels};
pub use primitives::{
    ArcPrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use scratch::{OffscreenSurface, RenderScratch};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from data and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
