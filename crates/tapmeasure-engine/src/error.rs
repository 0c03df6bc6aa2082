//! Error types for tap measurement.

use tapmeasure_geom::GeometryError;
use tapmeasure_scene::SceneError;
use thiserror::Error;

/// Errors that end a tap without an annotation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// No surface under the tap, or no frame captured yet.
    #[error("ray cast found no surface")]
    Miss,

    /// Too few grid samples hit a surface to form a polygon.
    #[error("insufficient samples: need {required}, got {found}")]
    InsufficientSamples {
        /// Minimum number of hits.
        required: usize,
        /// Hits actually collected.
        found: usize,
    },

    /// Engine configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Geometry contract violated.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The scene sink rejected the annotation.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for measurement operations.
pub type Result<T> = std::result::Result<T, MeasureError>;
