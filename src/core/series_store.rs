use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::{Color, Entry, Rounding};

const DEFAULT_SERIES_COLOR: Color = Color::rgb(140.0 / 255.0, 234.0 / 255.0, 1.0);
const DEFAULT_STACK_LABEL: &str = "Stack";
const DEFAULT_BAR_SPACE: f64 = 0.15;
const DEFAULT_SELECTION_SHIFT: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn include(bounds: Option<Self>, value: f64) -> Option<Self> {
        if value.is_nan() {
            return bounds;
        }
        Some(match bounds {
            Some(current) => Self {
                min: current.min.min(value),
                max: current.max.max(value),
            },
            None => Self {
                min: value,
                max: value,
            },
        })
    }
}

/// Ordered container for the entries of one logical series.
///
/// Lookup by x (`get_entry_index`, `get_entries_for_x`, ...) binary-searches
/// the entries and therefore requires them to be sorted ascending by x.
/// `add_entry_ordered` keeps that order; `add_entry` appends as-is and
/// leaves sorting to the caller. An unsorted store yields wrong lookups,
/// never a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStore {
    label: String,
    entries: Vec<Entry>,
    y_bounds: Option<Bounds>,
    x_bounds: Option<Bounds>,
    stack_size: usize,
    entry_count_including_stacks: usize,
    colors: Vec<Color>,
    stack_labels: Vec<String>,
    bar_space: f64,
    selection_shift: f64,
    visible: bool,
    highlight_enabled: bool,
}

impl SeriesStore {
    #[must_use]
    pub fn new(label: impl Into<String>, entries: Vec<Entry>) -> Self {
        let mut store = Self {
            label: label.into(),
            entries,
            y_bounds: None,
            x_bounds: None,
            stack_size: 1,
            entry_count_including_stacks: 0,
            colors: vec![DEFAULT_SERIES_COLOR],
            stack_labels: vec![DEFAULT_STACK_LABEL.to_owned()],
            bar_space: DEFAULT_BAR_SPACE,
            selection_shift: DEFAULT_SELECTION_SHIFT,
            visible: true,
            highlight_enabled: true,
        };
        store.recalculate();
        store
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        if !colors.is_empty() {
            self.colors = colors;
        }
        self
    }

    #[must_use]
    pub fn with_stack_labels(mut self, labels: Vec<String>) -> Self {
        if !labels.is_empty() {
            self.stack_labels = labels;
        }
        self
    }

    /// Fraction of one bar slot left empty between neighbouring bars.
    #[must_use]
    pub fn with_bar_space(mut self, bar_space: f64) -> Self {
        self.bar_space = bar_space.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_selection_shift(mut self, shift: f64) -> Self {
        self.selection_shift = shift.max(0.0);
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_highlight_enabled(mut self, enabled: bool) -> Self {
        self.highlight_enabled = enabled;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn index_of(&self, entry: &Entry) -> Option<usize> {
        self.entries.iter().position(|candidate| candidate == entry)
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for the entry at `index`, cycling through the configured colors.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn stack_labels(&self) -> &[String] {
        &self.stack_labels
    }

    #[must_use]
    pub fn bar_space(&self) -> f64 {
        self.bar_space
    }

    #[must_use]
    pub fn selection_shift(&self) -> f64 {
        self.selection_shift
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_highlight_enabled(&self) -> bool {
        self.highlight_enabled
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_bounds.map_or(0.0, |bounds| bounds.min)
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_bounds.map_or(0.0, |bounds| bounds.max)
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_bounds.map_or(0.0, |bounds| bounds.min)
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_bounds.map_or(0.0, |bounds| bounds.max)
    }

    /// Largest number of stack values carried by any entry (at least 1).
    #[must_use]
    pub fn stack_size(&self) -> usize {
        self.stack_size
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stack_size > 1
    }

    #[must_use]
    pub fn entry_count_including_stacks(&self) -> usize {
        self.entry_count_including_stacks
    }

    #[must_use]
    pub fn y_value_sum(&self) -> f64 {
        self.entries.iter().map(Entry::y).sum()
    }

    #[must_use]
    pub fn abs_y_value_sum(&self) -> f64 {
        self.entries.iter().map(|entry| entry.y().abs()).sum()
    }

    /// Appends without keeping x order; updates y/x bounds in O(1).
    ///
    /// Returns `false` and leaves the store untouched when `entry.x` is not
    /// finite.
    pub fn add_entry(&mut self, entry: Entry) -> bool {
        if !entry.x().is_finite() {
            return false;
        }
        self.include_in_stats(&entry);
        self.entries.push(entry);
        trace!(
            label = %self.label,
            count = self.entries.len(),
            "append entry"
        );
        true
    }

    /// Inserts at the position that keeps entries sorted ascending by x.
    ///
    /// When the last entry already lies beyond `entry.x`, the insertion
    /// point is found by binary search (`Rounding::Up`) and the entry is
    /// inserted before any entries sharing its x.
    pub fn add_entry_ordered(&mut self, entry: Entry) -> bool {
        if !entry.x().is_finite() {
            return false;
        }
        self.include_in_stats(&entry);

        let needs_insert = self
            .entries
            .last()
            .is_some_and(|last| last.x() > entry.x());
        if needs_insert {
            let index = self
                .get_entry_index(entry.x(), Rounding::Up)
                .unwrap_or(self.entries.len());
            trace!(label = %self.label, index, "insert ordered entry");
            self.entries.insert(index, entry);
        } else {
            self.entries.push(entry);
        }
        true
    }

    /// Removes the first entry equal to `entry` and rescans bounds.
    pub fn remove_entry(&mut self, entry: &Entry) -> bool {
        let Some(index) = self.index_of(entry) else {
            return false;
        };
        self.entries.remove(index);
        trace!(label = %self.label, index, "remove entry");
        self.recalculate();
        true
    }

    /// Replaces every entry and recomputes all derived statistics.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.recalculate();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recalculate();
    }

    /// Full rescan of `start..end` (clamped to the entry count).
    ///
    /// NaN y-values are skipped; a range without valid values reports
    /// `0.0` for both min and max.
    pub fn calc_min_max(&mut self, start: usize, end: usize) {
        let end = end.min(self.entries.len());
        let start = start.min(end);

        let mut y_bounds = None;
        let mut x_bounds = None;
        for entry in &self.entries[start..end] {
            if entry.y().is_nan() {
                continue;
            }
            y_bounds = Bounds::include(y_bounds, entry.y());
            x_bounds = Bounds::include(x_bounds, entry.x());
        }
        self.y_bounds = y_bounds;
        self.x_bounds = x_bounds;
    }

    pub fn calc_stack_size(&mut self) {
        self.stack_size = self
            .entries
            .iter()
            .filter_map(Entry::stack_values)
            .map(<[f64]>::len)
            .fold(1, usize::max);
    }

    pub fn calc_entry_count_including_stacks(&mut self) {
        self.entry_count_including_stacks = self.entries.iter().map(Entry::bar_count).sum();
    }

    /// Index of the entry at `x`, or the neighbour chosen by `rounding`.
    ///
    /// Among entries sharing an x the first one is returned. `None` only
    /// when the store is empty. Requires entries sorted by x.
    #[must_use]
    pub fn get_entry_index(&self, x: f64, rounding: Rounding) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        let mut low = 0_isize;
        let mut high = self.entries.len() as isize - 1;
        let mut closest = 0_usize;

        while low <= high {
            let mid = ((low + high) / 2) as usize;
            let mid_x = self.entries[mid].x();
            if x == mid_x {
                return Some(self.first_index_at(mid));
            }
            if x > mid_x {
                low = mid as isize + 1;
            } else {
                high = mid as isize - 1;
            }
            closest = mid;
        }

        let closest_x = self.entries[closest].x();
        let last = self.entries.len() - 1;
        let index = match rounding {
            Rounding::Up if closest_x < x && closest < last => closest + 1,
            Rounding::Down if closest_x > x && closest > 0 => closest - 1,
            Rounding::Closest => self.nearer_neighbour(closest, x),
            _ => closest,
        };
        Some(self.first_index_at(index))
    }

    #[must_use]
    pub fn entry_for_x(&self, x: f64, rounding: Rounding) -> Option<&Entry> {
        self.get_entry_index(x, rounding)
            .and_then(|index| self.entries.get(index))
    }

    /// y of the entry exactly at `x`, NaN when there is none.
    #[must_use]
    pub fn y_value_for_x(&self, x: f64) -> f64 {
        match self.entry_for_x(x, Rounding::Closest) {
            Some(entry) if entry.x() == x => entry.y(),
            _ => f64::NAN,
        }
    }

    #[must_use]
    pub fn y_values_for_x(&self, x: f64) -> Vec<f64> {
        self.get_entries_for_x(x).iter().map(Entry::y).collect()
    }

    /// All entries whose x equals `x` exactly (contiguous in a sorted store).
    #[must_use]
    pub fn get_entries_for_x(&self, x: f64) -> &[Entry] {
        let Ok(hit) = self.entries.binary_search_by(|entry| {
            entry.x().partial_cmp(&x).unwrap_or(Ordering::Less)
        }) else {
            return &[];
        };

        let mut first = hit;
        while first > 0 && self.entries[first - 1].x() == x {
            first -= 1;
        }
        let mut end = hit + 1;
        while end < self.entries.len() && self.entries[end].x() == x {
            end += 1;
        }
        &self.entries[first..end]
    }

    fn first_index_at(&self, mut index: usize) -> usize {
        let x = self.entries[index].x();
        while index > 0 && self.entries[index - 1].x() == x {
            index -= 1;
        }
        index
    }

    // The last probe brackets the target together with one neighbour.
    fn nearer_neighbour(&self, probe: usize, x: f64) -> usize {
        let probe_distance = (self.entries[probe].x() - x).abs();
        if self.entries[probe].x() < x {
            match self.entries.get(probe + 1) {
                Some(next) if (next.x() - x).abs() < probe_distance => probe + 1,
                _ => probe,
            }
        } else if probe > 0 && (self.entries[probe - 1].x() - x).abs() <= probe_distance {
            probe - 1
        } else {
            probe
        }
    }

    fn include_in_stats(&mut self, entry: &Entry) {
        if !entry.y().is_nan() {
            self.y_bounds = Bounds::include(self.y_bounds, entry.y());
            self.x_bounds = Bounds::include(self.x_bounds, entry.x());
        }
        if let Some(values) = entry.stack_values() {
            self.stack_size = self.stack_size.max(values.len());
        }
        self.entry_count_including_stacks += entry.bar_count();
    }

    fn recalculate(&mut self) {
        self.calc_min_max(0, self.entries.len());
        self.calc_stack_size();
        self.calc_entry_count_including_stacks();
    }
}
