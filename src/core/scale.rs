use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` onto `[0, span_px]`.
    #[must_use]
    pub fn domain_to_span(self, value: f64, span_px: f64) -> f64 {
        (value - self.domain_start) / (self.domain_end - self.domain_start) * span_px
    }

    #[must_use]
    pub fn span_to_domain(self, pixel: f64, span_px: f64) -> f64 {
        self.domain_start + pixel / span_px * (self.domain_end - self.domain_start)
    }
}

/// Chart-value to pixel transform for cartesian (bar/line) charts.
///
/// x grows rightward over the viewport width; y is inverted so larger
/// values sit higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueTransform {
    x: LinearScale,
    y: LinearScale,
    viewport: Viewport,
}

impl ValueTransform {
    pub fn new(x: LinearScale, y: LinearScale, viewport: Viewport) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self { x, y, viewport })
    }

    /// Builds a transform over `x_range`, with the y-domain widened to
    /// include zero (bars grow from the baseline). Degenerate ranges fall
    /// back to a unit span.
    pub fn fit(x_range: (f64, f64), y_range: (f64, f64), viewport: Viewport) -> ChartResult<Self> {
        let x = LinearScale::new(x_range.0, x_range.1)
            .or_else(|_| LinearScale::new(x_range.0, x_range.0 + 1.0))?;
        let y_low = y_range.0.min(0.0);
        let y_high = y_range.1.max(0.0);
        let y = LinearScale::new(y_low, y_high).or_else(|_| LinearScale::new(y_low, y_low + 1.0))?;
        Self::new(x, y, viewport)
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn value_to_pixel(self, x: f64, y: f64) -> (f64, f64) {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        (
            self.x.domain_to_span(x, width),
            height - self.y.domain_to_span(y, height),
        )
    }

    #[must_use]
    pub fn pixel_to_value(self, px: f64, py: f64) -> (f64, f64) {
        let width = f64::from(self.viewport.width);
        let height = f64::from(self.viewport.height);
        (
            self.x.span_to_domain(px, width),
            self.y.span_to_domain(height - py, height),
        )
    }
}
