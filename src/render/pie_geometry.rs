use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::api::PieConfig;
use crate::core::{AnimationPhase, ChartData, Color, PieAngles, Viewport, is_zero_value};
use crate::interaction::{Highlight, PieHitLayout};

/// Resolved pie placement inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub rotation_angle: f64,
    pub hole_radius_percent: f64,
    pub hole_enabled: bool,
    pub slice_space: f64,
}

impl PieLayout {
    /// Centers the pie in `viewport`, leaving `radius_padding` around it.
    #[must_use]
    pub fn fit(viewport: Viewport, config: &PieConfig) -> Self {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let radius = (width.min(height) / 2.0 - config.radius_padding).max(0.0);
        Self {
            center_x: width / 2.0,
            center_y: height / 2.0,
            radius,
            rotation_angle: config.rotation_angle,
            hole_radius_percent: config.hole_radius_percent,
            hole_enabled: config.hole_enabled,
            slice_space: config.slice_space,
        }
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        if self.hole_enabled {
            self.radius * self.hole_radius_percent / 100.0
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn hit_layout(&self) -> PieHitLayout {
        PieHitLayout {
            center_x: self.center_x,
            center_y: self.center_y,
            radius: self.radius,
            rotation_angle: self.rotation_angle,
        }
    }
}

/// Angle (degrees) that a linear gap of `space` subtends at `radius`.
///
/// A non-positive radius subtends no gap.
#[must_use]
pub fn slice_gap_angle(space: f64, radius: f64) -> f64 {
    if radius <= 0.0 || space <= 0.0 {
        return 0.0;
    }
    space / (PI / 180.0 * radius)
}

/// Drawable geometry of one pie slice. Angles are absolute (rotation and
/// phases applied).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceArc {
    pub slice_index: usize,
    pub series_index: usize,
    pub entry_index: usize,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub inner_start_angle: f64,
    pub inner_sweep_angle: f64,
    pub color: Color,
    pub highlighted: bool,
}

fn is_highlighted(highlights: &[Highlight], series_index: usize, x: f64) -> bool {
    highlights
        .iter()
        .any(|highlight| highlight.series_index == series_index && highlight.x_position == x)
}

/// Replaces `out` with the arcs of every non-zero slice.
///
/// Slices are laid clockwise from the rotation offset; `phase.x` reveals
/// them in order and `phase.y` scales start and sweep. Highlighted slices
/// are pushed out by their series' selection shift.
pub fn project_slices(
    data: &ChartData,
    angles: &PieAngles,
    layout: &PieLayout,
    phase: AnimationPhase,
    highlights: &[Highlight],
    out: &mut Vec<SliceArc>,
) {
    out.clear();
    let inner_radius = layout.inner_radius();
    let mut angle = 0.0;

    for (slice_index, slice) in angles.slices().iter().enumerate() {
        let slice_angle = angles.draw_angles()[slice_index];
        let Some(series) = data.get_data_set_by_index(slice.series_index) else {
            continue;
        };
        let Some(entry) = series.entry_at(slice.entry_index) else {
            continue;
        };

        if !is_zero_value(entry.y()) && entry.y().is_finite() && series.is_visible() {
            let highlighted = series.is_highlight_enabled()
                && is_highlighted(highlights, slice.series_index, entry.x());
            let outer_radius = if highlighted {
                layout.radius + series.selection_shift()
            } else {
                layout.radius
            };

            let outer_gap = slice_gap_angle(layout.slice_space, layout.radius);
            let start_angle = layout.rotation_angle + (angle + outer_gap / 2.0) * phase.y;
            let sweep_angle = ((slice_angle - outer_gap) * phase.y).max(0.0);

            let (inner_start_angle, inner_sweep_angle) = if inner_radius > 0.0 {
                let inner_gap = slice_gap_angle(layout.slice_space, inner_radius);
                (
                    layout.rotation_angle + (angle + inner_gap / 2.0) * phase.y,
                    ((slice_angle - inner_gap) * phase.y).max(0.0),
                )
            } else {
                (start_angle, 0.0)
            };

            out.push(SliceArc {
                slice_index,
                series_index: slice.series_index,
                entry_index: slice.entry_index,
                outer_radius,
                inner_radius,
                start_angle,
                sweep_angle,
                inner_start_angle,
                inner_sweep_angle,
                color: series.color_at(slice.entry_index),
                highlighted,
            });
        }

        angle += slice_angle * phase.x;
    }
}

/// Value label anchor for one slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceLabel {
    pub slice_index: usize,
    pub x: f64,
    pub y: f64,
    pub value: f64,
    /// Share of the absolute total, in percent.
    pub percent: f64,
    pub category: Option<String>,
}

/// Radius at which slice labels are centered.
#[must_use]
pub fn label_radius(layout: &PieLayout) -> f64 {
    let radius = layout.radius;
    let offset = if layout.hole_enabled {
        (radius - radius / 100.0 * layout.hole_radius_percent) / 2.0
    } else {
        radius / 10.0 * 3.6
    };
    radius - offset
}

/// Label anchors at the mid-angle of each revealed slice of a visible series.
#[must_use]
pub fn slice_labels(
    data: &ChartData,
    angles: &PieAngles,
    layout: &PieLayout,
    phase: AnimationPhase,
) -> Vec<SliceLabel> {
    let radius = label_radius(layout);
    let middle_gap = slice_gap_angle(layout.slice_space, radius);
    let total = angles.total();
    let mut labels = Vec::new();
    let mut slice_index = 0;

    for series in data.data_sets() {
        let entry_count = series.entry_count();
        if !series.is_visible() {
            slice_index += entry_count;
            continue;
        }
        let revealed = ((entry_count as f64 * phase.x).ceil() as usize).min(entry_count);
        for (entry_index, entry) in series.entries()[..revealed].iter().enumerate() {
            let index = slice_index + entry_index;
            let start = angles.start_angle(index) * phase.x;
            let slice_angle = angles.draw_angles().get(index).copied().unwrap_or(0.0);
            let angle = start + (slice_angle - middle_gap / 2.0) / 2.0;
            let radians = (layout.rotation_angle + angle).to_radians();

            let value = entry.y();
            let percent = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            labels.push(SliceLabel {
                slice_index: index,
                x: radius * radians.cos() + layout.center_x,
                y: radius * radians.sin() + layout.center_y,
                value,
                percent,
                category: data.category_labels().get(entry_index).cloned(),
            });
        }
        slice_index += entry_count;
    }
    labels
}
