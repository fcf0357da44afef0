use serde::{Deserialize, Serialize};

use crate::core::{AnimationPhase, ChartData, Entry, Rounding, SeriesStore};
use crate::interaction::Highlight;

/// One bar (or stack segment) in chart-value space.
///
/// `top >= bottom`: value space grows upward, unlike pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub series_index: usize,
    pub entry_index: usize,
    pub stack_index: Option<usize>,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BarRect {
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}

/// Center of the bar for category `x` in lane `series_index` of
/// `data_set_count`.
#[must_use]
pub fn bar_center_x(x: f64, series_index: usize, data_set_count: usize, group_space: f64) -> f64 {
    let lanes = data_set_count.max(1) as f64;
    x * lanes + series_index as f64 + group_space * x + group_space / 2.0
}

fn horizontal_extent(
    x: f64,
    series_index: usize,
    data_set_count: usize,
    group_space: f64,
    bar_space: f64,
) -> (f64, f64) {
    let center = bar_center_x(x, series_index, data_set_count, group_space);
    let half_width = 0.5 - bar_space / 2.0;
    (center - half_width, center + half_width)
}

fn push_entry_rects(
    entry: &Entry,
    entry_index: usize,
    series_index: usize,
    (left, right): (f64, f64),
    phase_y: f64,
    out: &mut Vec<BarRect>,
) {
    if entry.is_stacked() {
        for (stack_index, range) in entry.stack_ranges().into_iter().enumerate() {
            out.push(BarRect {
                series_index,
                entry_index,
                stack_index: Some(stack_index),
                left,
                top: range.from.max(range.to) * phase_y,
                right,
                bottom: range.from.min(range.to) * phase_y,
            });
        }
        return;
    }

    let y = entry.y();
    out.push(BarRect {
        series_index,
        entry_index,
        stack_index: None,
        left,
        top: y.max(0.0) * phase_y,
        right,
        bottom: y.min(0.0) * phase_y,
    });
}

/// Number of leading entries revealed at `phase_x`.
#[must_use]
pub fn revealed_count(entry_count: usize, phase_x: f64) -> usize {
    let revealed = (entry_count as f64 * phase_x.clamp(0.0, 1.0)).ceil() as usize;
    revealed.min(entry_count)
}

fn project_series(
    series: &SeriesStore,
    series_index: usize,
    data_set_count: usize,
    group_space: f64,
    phase: AnimationPhase,
    out: &mut Vec<BarRect>,
) {
    let revealed = revealed_count(series.entry_count(), phase.x);
    for (entry_index, entry) in series.entries()[..revealed].iter().enumerate() {
        if entry.y().is_nan() {
            continue;
        }
        let extent = horizontal_extent(
            entry.x(),
            series_index,
            data_set_count,
            group_space,
            series.bar_space(),
        );
        push_entry_rects(entry, entry_index, series_index, extent, phase.y, out);
    }
}

/// Appends the rectangles of one series to `out`. Hidden or unknown
/// series append nothing.
pub fn project_bar_rects(
    data: &ChartData,
    series_index: usize,
    phase: AnimationPhase,
    out: &mut Vec<BarRect>,
) {
    let Some(series) = data.get_data_set_by_index(series_index) else {
        return;
    };
    if !series.is_visible() {
        return;
    }
    project_series(
        series,
        series_index,
        data.get_data_set_count(),
        data.group_space(),
        phase,
        out,
    );
}

/// Replaces `out` with the rectangles of every visible series, in series
/// order.
#[cfg(not(feature = "parallel-projection"))]
pub fn project_all_bar_rects(data: &ChartData, phase: AnimationPhase, out: &mut Vec<BarRect>) {
    out.clear();
    for series_index in 0..data.get_data_set_count() {
        project_bar_rects(data, series_index, phase, out);
    }
}

/// Replaces `out` with the rectangles of every visible series, in series
/// order.
#[cfg(feature = "parallel-projection")]
pub fn project_all_bar_rects(data: &ChartData, phase: AnimationPhase, out: &mut Vec<BarRect>) {
    use rayon::prelude::*;

    out.clear();
    let per_series: Vec<Vec<BarRect>> = (0..data.get_data_set_count())
        .into_par_iter()
        .map(|series_index| {
            let mut rects = Vec::new();
            project_bar_rects(data, series_index, phase, &mut rects);
            rects
        })
        .collect();
    for rects in per_series {
        out.extend(rects);
    }
}

/// Full-height bounds of the bar for `entry`, ignoring animation.
#[must_use]
pub fn bar_bounds(data: &ChartData, series_index: usize, entry: &Entry) -> Option<BarRect> {
    let series = data.get_data_set_by_index(series_index)?;
    let entry_index = series.index_of(entry)?;
    let (left, right) = horizontal_extent(
        entry.x(),
        series_index,
        data.get_data_set_count(),
        data.group_space(),
        series.bar_space(),
    );
    let y = entry.y();
    Some(BarRect {
        series_index,
        entry_index,
        stack_index: None,
        left,
        top: y.max(0.0),
        right,
        bottom: y.min(0.0),
    })
}

/// Rectangle to overlay for `highlight`: the selected stack segment when
/// a stack index is set, otherwise the whole bar.
#[must_use]
pub fn highlight_rect(
    data: &ChartData,
    highlight: &Highlight,
    phase: AnimationPhase,
) -> Option<BarRect> {
    let series = data.get_data_set_by_index(highlight.series_index)?;
    if !series.is_highlight_enabled() {
        return None;
    }
    let entry_index = series.get_entry_index(highlight.x_position, Rounding::Closest)?;
    let entry = series.entry_at(entry_index)?;
    if entry.x() != highlight.x_position {
        return None;
    }

    let extent = horizontal_extent(
        entry.x(),
        highlight.series_index,
        data.get_data_set_count(),
        data.group_space(),
        series.bar_space(),
    );
    let mut rects = Vec::new();
    push_entry_rects(
        entry,
        entry_index,
        highlight.series_index,
        extent,
        phase.y,
        &mut rects,
    );

    match highlight.stack_index {
        Some(stack_index) if entry.is_stacked() => rects
            .into_iter()
            .find(|rect| rect.stack_index == Some(stack_index)),
        _ => {
            let top = rects.iter().map(|rect| rect.top).fold(0.0, f64::max);
            let bottom = rects.iter().map(|rect| rect.bottom).fold(0.0, f64::min);
            let first = rects.first()?;
            Some(BarRect {
                stack_index: None,
                top,
                bottom,
                ..*first
            })
        }
    }
}
