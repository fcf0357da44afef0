use ordered_float::OrderedFloat;

use crate::core::{ChartData, Rounding};

use super::{Highlight, HighlightResolver, TouchPoint};

/// Nearest-series hit testing for line charts.
///
/// The touch x snaps to a data position (rounded category index, or the
/// closest entry on a continuous axis); among the series with an entry
/// there, the one whose y is nearest the touch y wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineHighlighter;

impl HighlightResolver for LineHighlighter {
    fn resolve(&self, data: &ChartData, touch: TouchPoint) -> Option<Highlight> {
        if !touch.x.is_finite() || !touch.y.is_finite() {
            return None;
        }

        data.data_sets()
            .iter()
            .enumerate()
            .filter(|(_, series)| series.is_visible() && series.is_highlight_enabled())
            .filter_map(|(series_index, series)| {
                let entry = if data.is_categorical() {
                    let x_index = touch.x.round();
                    series
                        .entry_for_x(x_index, Rounding::Closest)
                        .filter(|entry| entry.x() == x_index)
                } else {
                    series.entry_for_x(touch.x, Rounding::Closest)
                }?;
                if entry.y().is_nan() {
                    return None;
                }
                Some((series_index, entry.x(), (entry.y() - touch.y).abs()))
            })
            .min_by_key(|(_, _, distance)| OrderedFloat(*distance))
            .map(|(series_index, x, _)| Highlight::new(x, series_index))
    }
}
