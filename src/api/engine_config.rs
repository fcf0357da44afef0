use serde::{Deserialize, Serialize};

use crate::core::{AnimationPhase, ChartKind, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::LegendConfig;

/// Pie placement and slice styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieConfig {
    /// Degrees, clockwise from +x, where the first slice starts.
    #[serde(default = "default_rotation_angle")]
    pub rotation_angle: f64,
    #[serde(default = "default_hole_radius_percent")]
    pub hole_radius_percent: f64,
    #[serde(default = "default_hole_enabled")]
    pub hole_enabled: bool,
    /// Linear gap between adjacent slices.
    #[serde(default)]
    pub slice_space: f64,
    #[serde(default = "default_radius_padding")]
    pub radius_padding: f64,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            rotation_angle: default_rotation_angle(),
            hole_radius_percent: default_hole_radius_percent(),
            hole_enabled: default_hole_enabled(),
            slice_space: 0.0,
            radius_padding: default_radius_padding(),
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so host applications can persist and reload chart setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_kind")]
    pub kind: ChartKind,
    #[serde(default = "default_group_space")]
    pub group_space: f64,
    #[serde(default)]
    pub pie: PieConfig,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default)]
    pub phase: AnimationPhase,
}

impl ChartEngineConfig {
    /// Creates a config with defaults for everything but size and kind.
    #[must_use]
    pub fn new(viewport: Viewport, kind: ChartKind) -> Self {
        Self {
            viewport,
            kind,
            group_space: default_group_space(),
            pie: PieConfig::default(),
            legend: LegendConfig::default(),
            phase: AnimationPhase::default(),
        }
    }

    /// Sets the gap between bar groups, in bar widths. Applied to data
    /// handed to the engine.
    #[must_use]
    pub fn with_group_space(mut self, group_space: f64) -> Self {
        self.group_space = group_space;
        self
    }

    #[must_use]
    pub fn with_pie(mut self, pie: PieConfig) -> Self {
        self.pie = pie;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: AnimationPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.phase.validate()?;
        super::validation::validate_spacing("group_space", self.group_space)?;
        super::validation::validate_pie_config(self.pie)?;
        super::validation::validate_legend_config(&self.legend)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_kind() -> ChartKind {
    ChartKind::Bar
}

fn default_group_space() -> f64 {
    0.8
}

fn default_rotation_angle() -> f64 {
    270.0
}

fn default_hole_radius_percent() -> f64 {
    50.0
}

fn default_hole_enabled() -> bool {
    true
}

fn default_radius_padding() -> f64 {
    20.0
}
