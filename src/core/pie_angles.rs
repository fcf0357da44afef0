use serde::{Deserialize, Serialize};

use crate::core::chart_data::ChartData;
use crate::core::primitives::{is_zero_value, normalize_degrees};

/// Position of one pie slice inside the chart data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRef {
    pub series_index: usize,
    pub entry_index: usize,
}

/// Per-slice sweep angles (degrees) for every entry of every series, in
/// drawing order.
///
/// Slice `i` spans `absolute_angles[i] - draw_angles[i]` to
/// `absolute_angles[i]` before rotation. Zero-valued entries get a zero
/// sweep, so they never draw and never win a hit test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieAngles {
    draw_angles: Vec<f64>,
    absolute_angles: Vec<f64>,
    slices: Vec<SliceRef>,
    #[serde(default)]
    total: f64,
}

impl PieAngles {
    #[must_use]
    pub fn compute(data: &ChartData) -> Self {
        let total: f64 = data
            .data_sets()
            .iter()
            .flat_map(|series| series.entries())
            .map(|entry| entry.y().abs())
            .filter(|magnitude| magnitude.is_finite() && !is_zero_value(*magnitude))
            .sum();

        let capacity = data.entry_count();
        let mut angles = Self {
            draw_angles: Vec::with_capacity(capacity),
            absolute_angles: Vec::with_capacity(capacity),
            slices: Vec::with_capacity(capacity),
            total,
        };

        let mut cumulative = 0.0;
        for (series_index, series) in data.data_sets().iter().enumerate() {
            for (entry_index, entry) in series.entries().iter().enumerate() {
                let magnitude = entry.y().abs();
                let sweep = if total > 0.0 && magnitude.is_finite() && !is_zero_value(magnitude)
                {
                    magnitude / total * 360.0
                } else {
                    0.0
                };
                cumulative += sweep;
                angles.draw_angles.push(sweep);
                angles.absolute_angles.push(cumulative);
                angles.slices.push(SliceRef {
                    series_index,
                    entry_index,
                });
            }
        }
        angles
    }

    /// Sum of the finite, non-zero magnitudes the sweeps are shares of.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[must_use]
    pub fn draw_angles(&self) -> &[f64] {
        &self.draw_angles
    }

    #[must_use]
    pub fn absolute_angles(&self) -> &[f64] {
        &self.absolute_angles
    }

    #[must_use]
    pub fn slices(&self) -> &[SliceRef] {
        &self.slices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_angles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_angles.is_empty()
    }

    /// Unrotated start angle of slice `index`.
    #[must_use]
    pub fn start_angle(&self, index: usize) -> f64 {
        match index {
            0 => 0.0,
            _ => self.absolute_angles.get(index - 1).copied().unwrap_or(0.0),
        }
    }

    #[must_use]
    pub fn slice_index(&self, series_index: usize, entry_index: usize) -> Option<usize> {
        self.slices.iter().position(|slice| {
            slice.series_index == series_index && slice.entry_index == entry_index
        })
    }

    /// Slice covering `angle` (degrees, screen clockwise from +x) once the
    /// chart rotation is removed.
    #[must_use]
    pub fn index_for_angle(&self, angle: f64, rotation_angle: f64) -> Option<usize> {
        let angle = normalize_degrees(angle - rotation_angle);
        self.absolute_angles
            .iter()
            .position(|&absolute| absolute > angle)
    }
}
