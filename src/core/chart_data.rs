use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::series_store::SeriesStore;
use crate::core::types::{ChartKind, Entry};
use crate::error::{ChartError, ChartResult};

/// Logical x-axis span the geometry works in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XExtent {
    pub chart_min: f64,
    pub chart_max: f64,
    pub delta_x: f64,
}

impl XExtent {
    #[must_use]
    pub fn contains(self, x: f64) -> bool {
        x >= self.chart_min && x <= self.chart_max
    }
}

/// All series of one chart plus the shared category-label axis.
///
/// With category labels present the chart is categorical and entry x
/// values are indices into `category_labels`; without labels x is a free
/// real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    series: Vec<SeriesStore>,
    category_labels: Vec<String>,
    group_space: f64,
    y_min: f64,
    y_max: f64,
    x_min: f64,
    x_max: f64,
    y_value_sum: f64,
    abs_y_value_sum: f64,
}

impl Default for ChartData {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl ChartData {
    #[must_use]
    pub fn new(category_labels: Vec<String>, series: Vec<SeriesStore>) -> Self {
        let mut data = Self {
            series,
            category_labels,
            group_space: 0.8,
            y_min: 0.0,
            y_max: 0.0,
            x_min: 0.0,
            x_max: 0.0,
            y_value_sum: 0.0,
            abs_y_value_sum: 0.0,
        };
        data.calc_min_max();
        data
    }

    /// Extra logical width reserved between category groups (grouped bars).
    #[must_use]
    pub fn with_group_space(mut self, group_space: f64) -> Self {
        self.set_group_space(group_space);
        self
    }

    pub fn set_group_space(&mut self, group_space: f64) {
        self.group_space = if group_space.is_finite() {
            group_space.max(0.0)
        } else {
            0.0
        };
    }

    /// Space between category groups, in lane units. Zero when there is
    /// at most one data set since nothing is grouped.
    #[must_use]
    pub fn group_space(&self) -> f64 {
        if self.series.len() <= 1 {
            0.0
        } else {
            self.group_space
        }
    }

    #[must_use]
    pub fn data_sets(&self) -> &[SeriesStore] {
        &self.series
    }

    #[must_use]
    pub fn get_data_set_by_index(&self, index: usize) -> Option<&SeriesStore> {
        self.series.get(index)
    }

    #[must_use]
    pub fn get_data_set_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn get_x_val_count(&self) -> usize {
        self.category_labels.len()
    }

    /// Number of x slots: category labels when categorical, otherwise the
    /// longest series.
    #[must_use]
    pub fn category_count(&self) -> usize {
        if self.is_categorical() {
            self.category_labels.len()
        } else {
            self.max_entry_count()
        }
    }

    #[must_use]
    pub fn category_labels(&self) -> &[String] {
        &self.category_labels
    }

    #[must_use]
    pub fn is_categorical(&self) -> bool {
        !self.category_labels.is_empty()
    }

    #[must_use]
    pub fn get_data_set_by_label(&self, label: &str, ignore_case: bool) -> Option<&SeriesStore> {
        self.series.iter().find(|series| {
            if ignore_case {
                series.label().eq_ignore_ascii_case(label)
            } else {
                series.label() == label
            }
        })
    }

    /// Index of the first data set containing an entry equal to `entry`.
    #[must_use]
    pub fn index_of_data_set_for_entry(&self, entry: &Entry) -> Option<usize> {
        self.series
            .iter()
            .position(|series| series.index_of(entry).is_some())
    }

    #[must_use]
    pub fn max_entry_count(&self) -> usize {
        self.series
            .iter()
            .map(SeriesStore::entry_count)
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Net sum of every y-value across all series.
    #[must_use]
    pub fn get_y_value_sum(&self) -> f64 {
        self.y_value_sum
    }

    /// Sum of |y| across all series; the denominator for pie angles and
    /// percentages.
    #[must_use]
    pub fn abs_y_value_sum(&self) -> f64 {
        self.abs_y_value_sum
    }

    /// Total entry count across all series.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.series.iter().map(SeriesStore::entry_count).sum()
    }

    pub fn add_data_set(&mut self, series: SeriesStore) {
        debug!(label = series.label(), entries = series.entry_count(), "add data set");
        self.series.push(series);
        self.calc_min_max();
    }

    pub fn remove_data_set(&mut self, index: usize) -> Option<SeriesStore> {
        if index >= self.series.len() {
            return None;
        }
        let removed = self.series.remove(index);
        debug!(label = removed.label(), "remove data set");
        self.calc_min_max();
        Some(removed)
    }

    /// Appends `entry` to one series, widening chart bounds incrementally.
    pub fn add_entry(&mut self, series_index: usize, entry: Entry) -> ChartResult<bool> {
        self.check_series_index(series_index)?;

        let (x, y) = (entry.x(), entry.y());
        let seeded = self.has_values();
        if !self.series[series_index].add_entry(entry) {
            return Ok(false);
        }
        trace!(series_index, x, y, "chart data add entry");

        if !y.is_nan() {
            if seeded {
                self.y_min = self.y_min.min(y);
                self.y_max = self.y_max.max(y);
                self.x_min = self.x_min.min(x);
                self.x_max = self.x_max.max(x);
            } else {
                (self.y_min, self.y_max, self.x_min, self.x_max) = (y, y, x, x);
            }
            self.y_value_sum += y;
            self.abs_y_value_sum += y.abs();
        }
        Ok(true)
    }

    /// Removes `entry` from one series and recomputes chart bounds.
    pub fn remove_entry(&mut self, series_index: usize, entry: &Entry) -> ChartResult<bool> {
        self.check_series_index(series_index)?;
        let removed = self.series[series_index].remove_entry(entry);
        if removed {
            self.calc_min_max();
        }
        Ok(removed)
    }

    /// Aggregates per-series bounds and sums into chart-wide values.
    pub fn calc_min_max(&mut self) {
        let mut y_bounds: Option<(f64, f64)> = None;
        let mut x_bounds: Option<(f64, f64)> = None;
        for series in self.series.iter().filter(|series| series_has_values(series)) {
            y_bounds = Some(match y_bounds {
                Some((min, max)) => (min.min(series.y_min()), max.max(series.y_max())),
                None => (series.y_min(), series.y_max()),
            });
            x_bounds = Some(match x_bounds {
                Some((min, max)) => (min.min(series.x_min()), max.max(series.x_max())),
                None => (series.x_min(), series.x_max()),
            });
        }

        (self.y_min, self.y_max) = y_bounds.unwrap_or((0.0, 0.0));
        (self.x_min, self.x_max) = x_bounds.unwrap_or((0.0, 0.0));
        self.y_value_sum = self
            .series
            .iter()
            .flat_map(SeriesStore::entries)
            .map(Entry::y)
            .filter(|y| !y.is_nan())
            .sum();
        self.abs_y_value_sum = self
            .series
            .iter()
            .flat_map(SeriesStore::entries)
            .map(|entry| entry.y().abs())
            .filter(|y| !y.is_nan())
            .sum();

        debug!(
            data_sets = self.series.len(),
            y_min = self.y_min,
            y_max = self.y_max,
            "recalculated chart bounds"
        );
    }

    /// Logical x-axis extent for `kind`.
    ///
    /// Bars widen the base delta by half a bar, multiply it by the data-set
    /// count (one lane per series) and add one group space per entry slot.
    #[must_use]
    pub fn x_extent(&self, kind: ChartKind) -> XExtent {
        let (base_min, base_delta) = if self.is_categorical() {
            (0.0, self.category_labels.len().saturating_sub(1) as f64)
        } else {
            (self.x_min, (self.x_max - self.x_min).abs())
        };

        match kind {
            ChartKind::Bar => {
                let mut delta_x = base_delta + 0.5;
                delta_x *= self.series.len() as f64;
                delta_x += self.max_entry_count() as f64 * self.group_space();
                let chart_min = -0.5;
                XExtent {
                    chart_min,
                    chart_max: delta_x - chart_min,
                    delta_x,
                }
            }
            ChartKind::Line | ChartKind::Pie => XExtent {
                chart_min: base_min,
                chart_max: base_min + base_delta,
                delta_x: base_delta,
            },
        }
    }

    fn has_values(&self) -> bool {
        self.series.iter().any(series_has_values)
    }

    fn check_series_index(&self, index: usize) -> ChartResult<()> {
        if index < self.series.len() {
            Ok(())
        } else {
            Err(ChartError::SeriesIndexOutOfRange {
                index,
                count: self.series.len(),
            })
        }
    }
}

fn series_has_values(series: &SeriesStore) -> bool {
    series.entries().iter().any(|entry| !entry.y().is_nan())
}
