use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Magnitudes at or below this threshold count as zero for pie slices.
pub const ZERO_VALUE_EPSILON: f64 = 1e-6;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

#[must_use]
pub fn is_zero_value(value: f64) -> bool {
    value.abs() <= ZERO_VALUE_EPSILON
}

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_degrees_wraps_both_directions() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn zero_value_gate_uses_magnitude() {
        assert!(is_zero_value(0.0));
        assert!(is_zero_value(-1e-7));
        assert!(!is_zero_value(-1e-3));
    }
}
