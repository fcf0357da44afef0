//! Touch resolution: logical input points back to data positions.
//!
//! Each chart kind has its own `HighlightResolver`; `ChartKind::highlight`
//! is the single place that picks one.

mod bar;
mod line;
mod pie;

pub use bar::{BarHighlighter, BarSlot, closest_stack_index, resolve_bar_highlight};
pub use line::LineHighlighter;
pub use pie::{PieHighlighter, PieHitLayout, angle_for_point};

use serde::{Deserialize, Serialize};

use crate::core::{ChartData, ChartKind};

/// Resolved data position for an input event.
///
/// Produced per event and discarded after use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub x_position: f64,
    pub series_index: usize,
    /// Sub-value of a stacked entry, `None` for whole entries.
    pub stack_index: Option<usize>,
}

impl Highlight {
    #[must_use]
    pub fn new(x_position: f64, series_index: usize) -> Self {
        Self {
            x_position,
            series_index,
            stack_index: None,
        }
    }

    #[must_use]
    pub fn with_stack_index(mut self, stack_index: usize) -> Self {
        self.stack_index = Some(stack_index);
        self
    }

    #[must_use]
    pub fn is_stack(self) -> bool {
        self.stack_index.is_some()
    }
}

/// Input point.
///
/// Bar and line charts expect chart-value coordinates (the pixel to value
/// transform happens upstream); pie charts expect chart-space coordinates
/// relative to the same origin as `PieHitLayout::center_*`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub trait HighlightResolver {
    fn resolve(&self, data: &ChartData, touch: TouchPoint) -> Option<Highlight>;
}

impl ChartKind {
    /// Resolves `touch` with the resolver matching this chart kind.
    #[must_use]
    pub fn highlight(
        self,
        data: &ChartData,
        touch: TouchPoint,
        pie_layout: PieHitLayout,
    ) -> Option<Highlight> {
        let highlight = match self {
            Self::Bar => BarHighlighter.resolve(data, touch),
            Self::Line => LineHighlighter.resolve(data, touch),
            Self::Pie => PieHighlighter::new(pie_layout).resolve(data, touch),
        };
        tracing::trace!(kind = ?self, x = touch.x, y = touch.y, ?highlight, "resolve highlight");
        highlight
    }
}
