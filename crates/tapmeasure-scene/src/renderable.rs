//! Opaque renderable descriptions handed to the scene sink.
//!
//! The core never builds meshes; it describes what to draw and leaves text
//! meshing and material setup to the rendering subsystem.

use serde::{Deserialize, Serialize};
use tapmeasure_math::Vec3;

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Pure green, used for area labels.
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Yellow, used for distance labels.
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    /// White, used for point markers.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Color from components.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Surface material for a renderable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Roughness factor (0.0 = mirror, 1.0 = diffuse).
    pub roughness: f64,
    /// Whether the surface is metallic (environment-mapped).
    pub metallic: bool,
}

impl Material {
    /// Glossy metallic material, as used for every annotation part.
    pub const fn glossy(color: Color) -> Self {
        Self {
            color,
            roughness: 0.0,
            metallic: true,
        }
    }
}

/// Geometry of a renderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Extruded text.
    Text {
        /// Text content.
        content: String,
        /// Extrusion depth in text units.
        extrusion_depth: f64,
    },
    /// Sphere centered at the local origin.
    Sphere {
        /// Sphere radius in meters.
        radius: f64,
    },
}

/// A child object attached to an anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Renderable {
    /// What to draw.
    pub shape: Shape,
    /// How to shade it.
    pub material: Material,
    /// Scale relative to the anchor.
    pub scale: Vec3,
    /// Offset from the anchor origin.
    pub local_position: Vec3,
}

impl Renderable {
    /// Text content, if this renderable is a label.
    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { content, .. } => Some(content),
            Shape::Sphere { .. } => None,
        }
    }

    /// Whether this renderable is a marker sphere.
    pub fn is_marker(&self) -> bool {
        matches!(self.shape, Shape::Sphere { .. })
    }
}
