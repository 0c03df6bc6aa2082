//! Measurement engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tapmeasure_raycast::RaycastQuery;
use tapmeasure_scene::AnnotationStyle;
use thiserror::Error;

use crate::error::{MeasureError, Result};
use crate::grid::{SelectionPolicy, DEFAULT_GRID_SPACING};

/// Minimum number of hits for an area: one triangle.
pub const MIN_AREA_SAMPLES: usize = 3;

/// Default area conversion, m² to cm².
pub const DEFAULT_AREA_UNIT_FACTOR: f64 = 100.0 * 100.0;

/// How a tap is turned into a measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureMode {
    /// Sample the grid and report polygon area.
    #[default]
    Area,
    /// Report the distance from the camera to the tapped surface.
    Distance,
}

/// Display unit for distances. World units are meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Meters, suffix `m`.
    #[default]
    Meters,
    /// Centimeters, suffix `cm`.
    Centimeters,
}

impl DistanceUnit {
    /// Multiplier from meters.
    pub fn factor(self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Centimeters => 100.0,
        }
    }

    /// Label suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Centimeters => "cm",
        }
    }
}

/// Engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Area or distance handling.
    pub mode: MeasureMode,
    /// Distance between grid samples in view units.
    pub grid_spacing: f64,
    /// Hits required before an area is computed (at least 3).
    pub min_samples: usize,
    /// Multiplier from m² to the displayed area unit.
    pub area_unit_factor: f64,
    /// Label suffix for areas.
    pub area_suffix: String,
    /// Display unit for distances.
    pub distance_unit: DistanceUnit,
    /// Also label each sampled point with its camera distance.
    pub annotate_samples: bool,
    /// Grid cells ray-cast for an area.
    pub selection: SelectionPolicy,
    /// Hit-test parameters sent to the reconstruction service.
    pub raycast: RaycastQuery,
    /// Annotation sizes and colors.
    pub style: AnnotationStyle,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            mode: MeasureMode::Area,
            grid_spacing: DEFAULT_GRID_SPACING,
            selection: SelectionPolicy::reference(),
            min_samples: MIN_AREA_SAMPLES,
            area_unit_factor: DEFAULT_AREA_UNIT_FACTOR,
            area_suffix: "cm2".to_string(),
            distance_unit: DistanceUnit::Meters,
            raycast: RaycastQuery::default(),
            annotate_samples: false,
            style: AnnotationStyle::default(),
        }
    }
}

impl MeasureConfig {
    /// Defaults with single-point distance mode.
    pub fn distance() -> Self {
        Self {
            mode: MeasureMode::Distance,
            ..Self::default()
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(MeasureError::InvalidConfig(
                "grid_spacing must be positive".into(),
            ));
        }
        if self.min_samples < MIN_AREA_SAMPLES {
            return Err(MeasureError::InvalidConfig(format!(
                "min_samples must be at least {MIN_AREA_SAMPLES}"
            )));
        }
        if !(self.area_unit_factor.is_finite() && self.area_unit_factor > 0.0) {
            return Err(MeasureError::InvalidConfig(
                "area_unit_factor must be positive".into(),
            ));
        }
        if self.mode == MeasureMode::Area && self.selection.len() < self.min_samples {
            return Err(MeasureError::InvalidConfig(format!(
                "selection has {} cells but min_samples is {}",
                self.selection.len(),
                self.min_samples
            )));
        }
        Ok(())
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parse a JSON document. Missing keys take their defaults.
    pub fn from_json_str(s: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Load from a `.json` or `.toml` file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }
}

/// Errors reading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed TOML.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization failed.
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
