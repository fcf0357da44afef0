//! Legend items and their placement.
//!
//! `compute_legend` turns series metadata into `LegendItem`s; `layout_legend`
//! positions them as glyph and label runs for one of the supported
//! placements.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ChartData, ChartKind, Color, SeriesStore, Viewport};

/// One legend slot.
///
/// `Grouped` swatches share the caption of the next `Labeled` item of the
/// same series; `Caption` is a trailing text-only group description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegendItem {
    Labeled { color: Color, text: String },
    Grouped { color: Color },
    Caption { text: String },
}

impl LegendItem {
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Labeled { text, .. } | Self::Caption { text } => Some(text),
            Self::Grouped { .. } => None,
        }
    }

    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Labeled { color, .. } | Self::Grouped { color } => Some(*color),
            Self::Caption { .. } => None,
        }
    }

    #[must_use]
    pub fn has_glyph(&self) -> bool {
        !matches!(self, Self::Caption { .. })
    }
}

fn push_caption(series: &SeriesStore, items: &mut Vec<LegendItem>) {
    if !series.label().is_empty() {
        items.push(LegendItem::Caption {
            text: series.label().to_owned(),
        });
    }
}

fn pie_items(data: &ChartData, series: &SeriesStore, items: &mut Vec<LegendItem>) {
    let count = series.colors().len().min(series.entry_count());
    for index in 0..count {
        let color = series.color_at(index);
        items.push(match data.category_labels().get(index) {
            Some(text) => LegendItem::Labeled {
                color,
                text: text.clone(),
            },
            None => LegendItem::Grouped { color },
        });
    }
    push_caption(series, items);
}

fn stacked_items(series: &SeriesStore, items: &mut Vec<LegendItem>) {
    let labels = series.stack_labels();
    let count = series.colors().len().min(series.stack_size());
    for index in 0..count {
        let color = series.color_at(index);
        items.push(match labels.get(index % labels.len().max(1)) {
            Some(text) => LegendItem::Labeled {
                color,
                text: text.clone(),
            },
            None => LegendItem::Grouped { color },
        });
    }
    push_caption(series, items);
}

fn plain_items(series: &SeriesStore, items: &mut Vec<LegendItem>) {
    let colors = series.colors().len();
    let entries = series.entry_count();
    let count = colors.min(entries);
    for index in 0..count {
        let color = series.color_at(index);
        let is_last = index + 1 >= colors || index + 1 >= entries;
        items.push(if is_last && !series.label().is_empty() {
            LegendItem::Labeled {
                color,
                text: series.label().to_owned(),
            }
        } else {
            LegendItem::Grouped { color }
        });
    }
}

/// Builds the legend items for `data` drawn as `kind`, series by series.
///
/// Plain series label only their last swatch. Stacked bar series label
/// each stack slot (cycling the stack labels) and pie series each
/// category; both then add the series label as a caption.
#[must_use]
pub fn compute_legend(data: &ChartData, kind: ChartKind) -> Vec<LegendItem> {
    let mut items = Vec::new();
    for series in data.data_sets() {
        match kind {
            ChartKind::Pie => pie_items(data, series, &mut items),
            _ if series.is_stacked() => stacked_items(series, &mut items),
            _ => plain_items(series, &mut items),
        }
    }
    tracing::trace!(kind = ?kind, items = items.len(), "computed legend");
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPlacement {
    BelowChartLeft,
    BelowChartRight,
    BelowChartCenter,
    RightOfChart,
    RightOfChartCenter,
    RightOfChartInside,
    PieChartCenter,
}

impl LegendPlacement {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            Self::BelowChartLeft | Self::BelowChartRight | Self::BelowChartCenter
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendForm {
    Square,
    Circle,
    Line,
}

fn default_enabled() -> bool {
    true
}

fn default_placement() -> LegendPlacement {
    LegendPlacement::BelowChartLeft
}

fn default_form() -> LegendForm {
    LegendForm::Square
}

fn default_form_size() -> f64 {
    8.0
}

fn default_text_size() -> f64 {
    10.0
}

fn default_form_to_text_space() -> f64 {
    5.0
}

fn default_x_entry_space() -> f64 {
    6.0
}

fn default_y_entry_space() -> f64 {
    5.0
}

fn default_stack_space() -> f64 {
    3.0
}

fn default_offset() -> f64 {
    5.0
}

fn default_text_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_placement")]
    pub placement: LegendPlacement,
    #[serde(default = "default_form")]
    pub form: LegendForm,
    #[serde(default = "default_form_size")]
    pub form_size: f64,
    #[serde(default = "default_text_size")]
    pub text_size: f64,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default = "default_form_to_text_space")]
    pub form_to_text_space: f64,
    #[serde(default = "default_x_entry_space")]
    pub x_entry_space: f64,
    #[serde(default = "default_y_entry_space")]
    pub y_entry_space: f64,
    #[serde(default = "default_stack_space")]
    pub stack_space: f64,
    /// Left inset (below-left) and right inset (below-right).
    #[serde(default = "default_offset")]
    pub offset_x: f64,
    /// Top inset for right-side placements; doubled as the bottom band
    /// height for below-chart placements.
    #[serde(default = "default_offset")]
    pub offset_y: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            placement: default_placement(),
            form: default_form(),
            form_size: default_form_size(),
            text_size: default_text_size(),
            text_color: default_text_color(),
            form_to_text_space: default_form_to_text_space(),
            x_entry_space: default_x_entry_space(),
            y_entry_space: default_y_entry_space(),
            stack_space: default_stack_space(),
            offset_x: default_offset(),
            offset_y: default_offset(),
        }
    }
}

impl LegendConfig {
    #[must_use]
    pub fn with_placement(mut self, placement: LegendPlacement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_form(mut self, form: LegendForm) -> Self {
        self.form = form;
        self
    }

    fn form_and_text_space(&self) -> f64 {
        self.form_size + self.form_to_text_space
    }
}

/// Text metrics source for legend layout.
pub trait TextMeasurer {
    fn text_width(&self, text: &str, font_size_px: f64) -> f64;
    fn text_height(&self, text: &str, font_size_px: f64) -> f64;
}

/// Fixed-advance estimate for headless layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedTextMeasurer {
    pub char_width_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            line_height_ratio: 1.0,
        }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn text_width(&self, text: &str, font_size_px: f64) -> f64 {
        text.chars().count() as f64 * font_size_px * self.char_width_ratio
    }

    fn text_height(&self, _text: &str, font_size_px: f64) -> f64 {
        font_size_px * self.line_height_ratio
    }
}

/// Widest label among `items`.
#[must_use]
pub fn maximum_entry_length(
    items: &[LegendItem],
    config: &LegendConfig,
    measurer: &impl TextMeasurer,
) -> f64 {
    items
        .iter()
        .filter_map(LegendItem::label)
        .map(|text| OrderedFloat(measurer.text_width(text, config.text_size)))
        .max()
        .map_or(0.0, OrderedFloat::into_inner)
}

/// Total width of a horizontal legend.
#[must_use]
pub fn full_width(items: &[LegendItem], config: &LegendConfig, measurer: &impl TextMeasurer) -> f64 {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.label() {
            Some(text) => {
                let glyph = if item.has_glyph() {
                    config.form_and_text_space()
                } else {
                    0.0
                };
                let spacing = if index < last { config.x_entry_space } else { 0.0 };
                glyph + measurer.text_width(text, config.text_size) + spacing
            }
            None => config.form_size + config.stack_space,
        })
        .sum()
}

/// Total height of a vertical legend.
#[must_use]
pub fn full_height(
    items: &[LegendItem],
    config: &LegendConfig,
    measurer: &impl TextMeasurer,
) -> f64 {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| item.label().map(|text| (index, text)))
        .map(|(index, text)| {
            let spacing = if index < last { config.y_entry_space } else { 0.0 };
            measurer.text_height(text, config.text_size) + spacing
        })
        .sum()
}

/// Positioned legend output. Glyph `y` is the vertical center of the form;
/// label `y` is the text baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegendRun {
    Glyph {
        item_index: usize,
        x: f64,
        y: f64,
        size: f64,
        form: LegendForm,
        color: Color,
    },
    Label {
        item_index: usize,
        x: f64,
        y: f64,
        text: String,
    },
}

impl LegendRun {
    #[must_use]
    pub fn item_index(&self) -> usize {
        match self {
            Self::Glyph { item_index, .. } | Self::Label { item_index, .. } => *item_index,
        }
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        match self {
            Self::Glyph { x, y, .. } | Self::Label { x, y, .. } => (*x, *y),
        }
    }
}

fn push_glyph(
    runs: &mut Vec<LegendRun>,
    config: &LegendConfig,
    item_index: usize,
    item: &LegendItem,
    x: f64,
    y: f64,
) {
    if let Some(color) = item.color() {
        runs.push(LegendRun::Glyph {
            item_index,
            x,
            y,
            size: config.form_size,
            form: config.form,
            color,
        });
    }
}

fn push_label(runs: &mut Vec<LegendRun>, item_index: usize, text: &str, x: f64, y: f64) {
    runs.push(LegendRun::Label {
        item_index,
        x,
        y,
        text: text.to_owned(),
    });
}

/// Replaces `runs` with the positioned glyphs and labels of `items`.
pub fn layout_legend(
    items: &[LegendItem],
    config: &LegendConfig,
    viewport: Viewport,
    measurer: &impl TextMeasurer,
    runs: &mut Vec<LegendRun>,
) {
    runs.clear();
    if !config.enabled || items.is_empty() {
        return;
    }

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let text_drop = (measurer.text_height("AQJ", config.text_size) + config.form_size) / 2.0;
    let baseline_y = height - config.offset_y / 2.0 - config.form_size / 2.0;

    match config.placement {
        LegendPlacement::BelowChartLeft => {
            layout_row(items, config, measurer, config.offset_x, baseline_y, text_drop, runs);
        }
        LegendPlacement::BelowChartCenter => {
            let start_x = width / 2.0 - full_width(items, config, measurer) / 2.0;
            layout_row(items, config, measurer, start_x, baseline_y, text_drop, runs);
        }
        LegendPlacement::BelowChartRight => {
            layout_row_reversed(
                items,
                config,
                measurer,
                width - config.offset_x,
                baseline_y,
                text_drop,
                runs,
            );
        }
        LegendPlacement::RightOfChart | LegendPlacement::RightOfChartInside => {
            let start_x = width
                - maximum_entry_length(items, config, measurer)
                - config.form_and_text_space();
            layout_column(items, config, start_x, config.offset_y, text_drop, runs);
        }
        LegendPlacement::RightOfChartCenter => {
            let start_x = width
                - maximum_entry_length(items, config, measurer)
                - config.form_and_text_space();
            let start_y = height / 2.0 - full_height(items, config, measurer) / 2.0;
            layout_column(items, config, start_x, start_y, text_drop, runs);
        }
        LegendPlacement::PieChartCenter => {
            let start_x = width / 2.0
                - (maximum_entry_length(items, config, measurer) + config.x_entry_space) / 2.0;
            let start_y = height / 2.0 - full_height(items, config, measurer) / 2.0;
            layout_column(items, config, start_x, start_y, text_drop, runs);
        }
    }
}

fn layout_row(
    items: &[LegendItem],
    config: &LegendConfig,
    measurer: &impl TextMeasurer,
    start_x: f64,
    y: f64,
    text_drop: f64,
    runs: &mut Vec<LegendRun>,
) {
    let mut x = start_x;
    for (index, item) in items.iter().enumerate() {
        push_glyph(runs, config, index, item, x, y);
        match item.label() {
            Some(text) => {
                if item.has_glyph() {
                    x += config.form_and_text_space();
                }
                push_label(runs, index, text, x, y + text_drop);
                x += measurer.text_width(text, config.text_size) + config.x_entry_space;
            }
            None => x += config.form_size + config.stack_space,
        }
    }
}

fn layout_row_reversed(
    items: &[LegendItem],
    config: &LegendConfig,
    measurer: &impl TextMeasurer,
    start_x: f64,
    y: f64,
    text_drop: f64,
    runs: &mut Vec<LegendRun>,
) {
    let mut x = start_x;
    for (index, item) in items.iter().enumerate().rev() {
        match item.label() {
            Some(text) => {
                x -= measurer.text_width(text, config.text_size) + config.x_entry_space;
                push_label(runs, index, text, x, y + text_drop);
                if item.has_glyph() {
                    x -= config.form_and_text_space();
                }
            }
            None => x -= config.stack_space + config.form_size,
        }
        push_glyph(runs, config, index, item, x, y);
    }
}

fn layout_column(
    items: &[LegendItem],
    config: &LegendConfig,
    x: f64,
    start_y: f64,
    text_drop: f64,
    runs: &mut Vec<LegendRun>,
) {
    let mut y = start_y;
    let mut stack = 0.0;
    let mut was_stacked = false;

    for (index, item) in items.iter().enumerate() {
        push_glyph(runs, config, index, item, x + stack, y);
        match item.label() {
            Some(text) => {
                if was_stacked {
                    y += config.text_size * 1.2 + config.form_size;
                    push_label(runs, index, text, x, y);
                } else {
                    let label_x = if item.has_glyph() {
                        x + config.form_and_text_space()
                    } else {
                        x
                    };
                    y += text_drop;
                    push_label(runs, index, text, label_x, y);
                }
                y += config.y_entry_space;
                stack = 0.0;
                was_stacked = false;
            }
            None => {
                stack += config.form_size + config.stack_space;
                was_stacked = true;
            }
        }
    }
}
