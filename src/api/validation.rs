use crate::error::{ChartError, ChartResult};
use crate::render::LegendConfig;

use super::PieConfig;

pub(super) fn validate_spacing(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

pub(super) fn validate_pie_config(config: PieConfig) -> ChartResult<()> {
    if !config.rotation_angle.is_finite() {
        return Err(ChartError::InvalidData(
            "pie rotation angle must be finite".to_owned(),
        ));
    }
    if !config.hole_radius_percent.is_finite()
        || !(0.0..=100.0).contains(&config.hole_radius_percent)
    {
        return Err(ChartError::InvalidData(
            "pie hole radius percent must be in [0, 100]".to_owned(),
        ));
    }
    validate_spacing("pie slice_space", config.slice_space)?;
    validate_spacing("pie radius_padding", config.radius_padding)
}

pub(super) fn validate_legend_config(config: &LegendConfig) -> ChartResult<()> {
    for (name, value) in [
        ("legend form_size", config.form_size),
        ("legend form_to_text_space", config.form_to_text_space),
        ("legend x_entry_space", config.x_entry_space),
        ("legend y_entry_space", config.y_entry_space),
        ("legend stack_space", config.stack_space),
        ("legend offset_x", config.offset_x),
        ("legend offset_y", config.offset_y),
    ] {
        validate_spacing(name, value)?;
    }
    if !config.text_size.is_finite() || config.text_size <= 0.0 {
        return Err(ChartError::InvalidData(
            "legend text size must be finite and > 0".to_owned(),
        ));
    }
    config.text_color.validate()
}
