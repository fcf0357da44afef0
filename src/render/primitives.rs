use serde::{Deserialize, Serialize};

pub use crate::core::Color;
use crate::error::{ChartError, ChartResult};

fn ensure_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

/// Axis-aligned rectangle in pixel space.
///
/// `top <= bottom` with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64, color: Color) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            color,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.left, self.top, self.right, self.bottom], "rect")?;
        if self.right < self.left || self.bottom < self.top {
            return Err(ChartError::InvalidData(
                "rect edges must satisfy left <= right and top <= bottom".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Annular (or full) pie sector. Angles are degrees, clockwise from +x.
///
/// The inner arc has its own start/sweep because the slice gap is
/// converted to an angle per radius. `inner_radius == 0` means no hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub inner_start_angle: f64,
    pub inner_sweep_angle: f64,
    pub color: Color,
}

impl ArcPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(
            &[
                self.center_x,
                self.center_y,
                self.outer_radius,
                self.inner_radius,
                self.start_angle,
                self.sweep_angle,
                self.inner_start_angle,
                self.inner_sweep_angle,
            ],
            "arc",
        )?;
        if self.outer_radius < 0.0 || self.inner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "arc radii must be >= 0".to_owned(),
            ));
        }
        if self.sweep_angle < 0.0 || self.inner_sweep_angle < 0.0 {
            return Err(ChartError::InvalidData(
                "arc sweeps must be >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }

    #[must_use]
    pub fn has_hole(self) -> bool {
        self.inner_radius > 0.0
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y], "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
