//! Measurement results and their placement as in-scene labels.

use serde::{Deserialize, Serialize};
use tapmeasure_math::{Point3, Vec3};

use crate::error::Result;
use crate::{Color, Material, Renderable, SceneSink, Shape};

/// What a measurement quantifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Camera-to-point distance.
    Distance,
    /// Polygon area over sampled points.
    Area,
}

/// Outcome of one tap, already converted to display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementResult {
    /// Distance or area.
    pub kind: MeasurementKind,
    /// Measured value in display units.
    pub value: f64,
    /// Unit suffix appended to the label (e.g. `"cm2"`, `"m"`).
    pub unit: String,
    /// World position the label is anchored at.
    pub anchor: Point3,
    /// World points the value was derived from.
    pub samples: Vec<Point3>,
}

impl MeasurementResult {
    /// Label text with `decimals` fractional digits and the unit suffix.
    pub fn label(&self, decimals: usize) -> String {
        format!("{:.*}{}", decimals, self.value, self.unit)
    }
}

/// Fixed sizes and colors for annotation renderables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Fractional digits shown in labels.
    pub decimals: usize,
    /// Uniform label scale. Text meshes are generated at 1.0 font size and
    /// shrink to in-scene size here.
    pub label_scale: f64,
    /// Label offset above the anchor, in meters.
    pub label_offset: Vec3,
    /// Text extrusion depth in font units.
    pub extrusion_depth: f64,
    /// Radius of the distance marker sphere, in meters.
    pub marker_radius: f64,
    /// Label color for areas.
    pub area_color: Color,
    /// Label color for distances.
    pub distance_color: Color,
    /// Marker sphere color.
    pub marker_color: Color,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            decimals: 2,
            label_scale: 0.01,
            label_offset: Vec3::new(0.0, 0.02, 0.0),
            extrusion_depth: 0.1,
            marker_radius: 0.01,
            area_color: Color::GREEN,
            distance_color: Color::YELLOW,
            marker_color: Color::WHITE,
        }
    }
}

impl AnnotationStyle {
    /// Text label for `result`.
    pub fn label_for(&self, result: &MeasurementResult) -> Renderable {
        let color = match result.kind {
            MeasurementKind::Area => self.area_color,
            MeasurementKind::Distance => self.distance_color,
        };
        Renderable {
            shape: Shape::Text {
                content: result.label(self.decimals),
                extrusion_depth: self.extrusion_depth,
            },
            material: Material::glossy(color),
            scale: Vec3::repeat(self.label_scale),
            local_position: self.label_offset,
        }
    }

    /// Marker sphere at the anchor's local origin.
    pub fn marker(&self) -> Renderable {
        Renderable {
            shape: Shape::Sphere {
                radius: self.marker_radius,
            },
            material: Material::glossy(self.marker_color),
            scale: Vec3::repeat(1.0),
            local_position: Vec3::zeros(),
        }
    }
}

/// Place `result` into `sink` as a new, independent annotation.
///
/// Distance results get a marker sphere in addition to the label. Existing
/// anchors are never touched.
pub fn place<S: SceneSink>(
    sink: &mut S,
    result: &MeasurementResult,
    style: &AnnotationStyle,
) -> Result<S::Anchor> {
    let anchor = sink.add_anchor(result.anchor)?;
    if result.kind == MeasurementKind::Distance {
        sink.add_child(anchor, style.marker())?;
    }
    sink.add_child(anchor, style.label_for(result))?;
    Ok(anchor)
}
