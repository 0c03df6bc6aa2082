#![warn(missing_docs)]

//! Annotation placement for AR measurements.
//!
//! A [`MeasurementResult`] becomes a world anchor holding a text label and,
//! for distances, a small marker sphere. Anchors go into whatever
//! [`SceneSink`] the caller injects; [`SceneGraph`] is the in-memory sink
//! used when no renderer is attached.
//!
//! # Example
//!
//! ```
//! use tapmeasure_math::Point3;
//! use tapmeasure_scene::{
//!     place, AnnotationStyle, MeasurementKind, MeasurementResult, SceneGraph,
//! };
//!
//! let mut scene = SceneGraph::new();
//! let result = MeasurementResult {
//!     kind: MeasurementKind::Distance,
//!     value: 2.0,
//!     unit: "m".into(),
//!     anchor: Point3::new(0.0, 0.0, -2.0),
//!     samples: vec![Point3::new(0.0, 0.0, -2.0)],
//! };
//! let id = place(&mut scene, &result, &AnnotationStyle::default()).unwrap();
//! assert_eq!(scene.get(id).unwrap().label(), Some("2.00m"));
//! ```

mod annotation;
pub mod error;
mod renderable;
mod sink;

pub use annotation::{place, AnnotationStyle, MeasurementKind, MeasurementResult};
pub use error::{Result, SceneError};
pub use renderable::{Color, Material, Renderable, Shape};
pub use sink::{AnchorId, AnchorNode, SceneGraph, SceneSink};
