use serde::{Deserialize, Serialize};

use crate::core::{ChartData, PieAngles, normalize_degrees};

use super::{Highlight, HighlightResolver, TouchPoint};

/// Pie placement needed to hit-test a touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieHitLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub rotation_angle: f64,
}

impl Default for PieHitLayout {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            radius: 0.0,
            rotation_angle: 270.0,
        }
    }
}

/// Angle of `(x, y)` around the center in degrees, `[0, 360)`, measured
/// clockwise on screen (y grows downward) from the +x axis.
#[must_use]
pub fn angle_for_point(center_x: f64, center_y: f64, x: f64, y: f64) -> f64 {
    normalize_degrees((y - center_y).atan2(x - center_x).to_degrees())
}

#[derive(Debug, Clone, Copy)]
pub struct PieHighlighter {
    layout: PieHitLayout,
}

impl PieHighlighter {
    #[must_use]
    pub fn new(layout: PieHitLayout) -> Self {
        Self { layout }
    }
}

impl HighlightResolver for PieHighlighter {
    fn resolve(&self, data: &ChartData, touch: TouchPoint) -> Option<Highlight> {
        let layout = self.layout;
        let dx = touch.x - layout.center_x;
        let dy = touch.y - layout.center_y;
        let distance = dx.hypot(dy);
        if !distance.is_finite() || distance > layout.radius {
            return None;
        }

        let angles = PieAngles::compute(data);
        let angle = angle_for_point(layout.center_x, layout.center_y, touch.x, touch.y);
        let slice = angles.index_for_angle(angle, layout.rotation_angle)?;
        let slice = angles.slices()[slice];

        let series = data.get_data_set_by_index(slice.series_index)?;
        if !series.is_highlight_enabled() {
            return None;
        }
        let entry = series.entry_at(slice.entry_index)?;
        Some(Highlight::new(entry.x(), slice.series_index))
    }
}
