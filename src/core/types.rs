use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Animation progress consumed by geometry; both axes in `[0, 1]`.
///
/// `x` reveals entries (bar count, pie angular reveal), `y` grows values
/// (bar heights, pie sweeps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationPhase {
    pub x: f64,
    pub y: f64,
}

impl Default for AnimationPhase {
    fn default() -> Self {
        Self::COMPLETE
    }
}

impl AnimationPhase {
    pub const COMPLETE: Self = Self { x: 1.0, y: 1.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (axis, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidPhase { axis, value });
            }
        }
        Ok(())
    }
}

/// Chart family selecting layout, highlight and geometry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// Tie-break policy for x lookups that have no exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Nearest entry with `x >= target`.
    Up,
    /// Nearest entry with `x <= target`.
    Down,
    /// Nearest entry by distance.
    Closest,
}

/// Value interval covered by one stack sub-value, in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackRange {
    pub from: f64,
    pub to: f64,
}

impl StackRange {
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (low, high) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        value >= low && value <= high
    }

    /// Distance from `value` to the nearest edge, zero when contained.
    #[must_use]
    pub fn distance(self, value: f64) -> f64 {
        if self.contains(value) {
            0.0
        } else {
            (value - self.from).abs().min((value - self.to).abs())
        }
    }
}

/// One logical data point.
///
/// Stacked entries keep their sub-values; `y` is always their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryRepr")]
pub struct Entry {
    x: f64,
    y: f64,
    stack: Option<SmallVec<[f64; 4]>>,
}

/// Wire shape of [`Entry`]; a stored `y` is ignored when a stack is present.
#[derive(Deserialize)]
struct EntryRepr {
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    stack: Option<SmallVec<[f64; 4]>>,
}

impl From<EntryRepr> for Entry {
    fn from(repr: EntryRepr) -> Self {
        match repr.stack {
            Some(values) => Self::stacked(repr.x, values),
            None => Self::new(repr.x, repr.y),
        }
    }
}

impl Entry {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, stack: None }
    }

    #[must_use]
    pub fn stacked(x: f64, values: impl IntoIterator<Item = f64>) -> Self {
        let values: SmallVec<[f64; 4]> = values.into_iter().collect();
        let y = values.iter().sum();
        Self {
            x,
            y,
            stack: Some(values),
        }
    }

    pub fn from_decimal(x: f64, value: Decimal) -> ChartResult<Self> {
        Ok(Self::new(x, decimal_to_f64(value, "value")?))
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        Self::from_decimal(datetime_to_unix_seconds(time), value)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn stack_values(&self) -> Option<&[f64]> {
        self.stack.as_deref()
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.stack.is_some()
    }

    /// Number of bars this entry occupies: one per stack value, at least one.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.stack.as_ref().map_or(1, |values| values.len().max(1))
    }

    #[must_use]
    pub fn positive_sum(&self) -> f64 {
        self.stack.as_ref().map_or(self.y.max(0.0), |values| {
            values.iter().filter(|value| **value > 0.0).sum()
        })
    }

    /// Magnitude of the negative part of the entry.
    #[must_use]
    pub fn negative_sum(&self) -> f64 {
        self.stack.as_ref().map_or((-self.y).max(0.0), |values| {
            values
                .iter()
                .filter(|value| **value < 0.0)
                .map(|value| value.abs())
                .sum()
        })
    }

    /// Ranges of each stack value: positives grow upward from zero,
    /// negatives grow downward from zero.
    #[must_use]
    pub fn stack_ranges(&self) -> Vec<StackRange> {
        let Some(values) = self.stack.as_ref() else {
            return Vec::new();
        };

        let mut positive = 0.0;
        let mut negative = 0.0;
        values
            .iter()
            .map(|&value| {
                if value >= 0.0 {
                    let from = positive;
                    positive += value;
                    StackRange { from, to: positive }
                } else {
                    let from = negative;
                    negative += value;
                    StackRange { from, to: negative }
                }
            })
            .collect()
    }
}
