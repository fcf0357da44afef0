use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ChartData, ChartKind, Rounding, StackRange};

use super::{Highlight, HighlightResolver, TouchPoint};

/// Category slot and series lane hit by a bar-chart touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSlot {
    pub x_index: usize,
    pub series_index: usize,
}

/// Maps a logical x-value onto a grouped-bar slot.
///
/// The axis repeats groups of width `data_set_count + group_space`: one lane
/// per series followed by the group gap. The gap consumed before `x_value`
/// is removed first, then the remaining position splits into a category
/// index and a series lane. Results are clamped into the plotted range.
///
/// Returns `None` when there are no categories or `x_value` is not finite.
#[must_use]
pub fn resolve_bar_highlight(
    x_value: f64,
    data_set_count: usize,
    group_space: f64,
    category_count: usize,
) -> Option<BarSlot> {
    if category_count == 0 || !x_value.is_finite() {
        return None;
    }

    if data_set_count <= 1 {
        return Some(BarSlot {
            x_index: x_value.round().max(0.0) as usize,
            series_index: 0,
        });
    }

    let set_count = data_set_count as f64;
    let steps = (x_value / (set_count + group_space)).floor();
    let group_space_consumed = group_space * steps;
    let position_without_spacing = x_value - group_space_consumed;

    let last_series = data_set_count as i64 - 1;
    let mut series_index = position_without_spacing.floor() as i64 % data_set_count as i64;
    let mut x_index = (position_without_spacing / set_count).floor() as i64;

    if x_index < 0 {
        x_index = 0;
        series_index = 0;
    } else if x_index >= category_count as i64 {
        x_index = category_count as i64 - 1;
        series_index = last_series;
    }
    let series_index = series_index.clamp(0, last_series);

    Some(BarSlot {
        x_index: x_index as usize,
        series_index: series_index as usize,
    })
}

/// Stack sub-value hit by `y`: the range containing it, otherwise the
/// nearest one (lower index on ties).
#[must_use]
pub fn closest_stack_index(ranges: &[StackRange], y: f64) -> Option<usize> {
    if !y.is_finite() {
        return None;
    }
    ranges
        .iter()
        .position(|range| range.contains(y))
        .or_else(|| {
            ranges
                .iter()
                .enumerate()
                .min_by_key(|(_, range)| OrderedFloat(range.distance(y)))
                .map(|(index, _)| index)
        })
}

/// Grouped and stacked bar hit testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarHighlighter;

impl HighlightResolver for BarHighlighter {
    fn resolve(&self, data: &ChartData, touch: TouchPoint) -> Option<Highlight> {
        if data.get_data_set_count() == 0 || !data.x_extent(ChartKind::Bar).contains(touch.x) {
            return None;
        }

        let slot = resolve_bar_highlight(
            touch.x,
            data.get_data_set_count(),
            data.group_space(),
            data.category_count(),
        )?;
        let series = data.get_data_set_by_index(slot.series_index)?;
        if !series.is_highlight_enabled() {
            return None;
        }

        let highlight = Highlight::new(slot.x_index as f64, slot.series_index);
        let stacked_entry = series
            .entry_for_x(slot.x_index as f64, Rounding::Closest)
            .filter(|entry| entry.x() == slot.x_index as f64 && entry.is_stacked());

        Some(match stacked_entry {
            Some(entry) => match closest_stack_index(&entry.stack_ranges(), touch.y) {
                Some(stack_index) => highlight.with_stack_index(stack_index),
                None => highlight,
            },
            None => highlight,
        })
    }
}
