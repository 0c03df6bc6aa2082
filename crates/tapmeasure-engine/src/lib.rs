#![warn(missing_docs)]

//! Tap-driven spatial measurement.
//!
//! On each tap the engine either ray-casts the tapped point and reports its
//! distance from the camera, or samples a fixed grid of screen points,
//! ray-casts the selected cells, and reports the area of the polygon they
//! span. A [`MeasurementSession`] places every result into a scene sink as a
//! new annotation.
//!
//! # Example
//!
//! ```
//! use tapmeasure_engine::{MeasureConfig, MeasurementEngine, MeasurementSession};
//! use tapmeasure_math::Point3;
//! use tapmeasure_raycast::{CameraPose, DetectedPlane, Frame, PlaneScene, ScreenPoint, ViewSize};
//! use tapmeasure_scene::SceneGraph;
//!
//! let scene = PlaneScene::new().with_plane(DetectedPlane::wall(-2.0));
//! let engine = MeasurementEngine::new(scene, MeasureConfig::distance()).unwrap();
//! let session = MeasurementSession::new(engine, SceneGraph::new());
//!
//! let frame = Frame::new(CameraPose::at(Point3::origin()), 0.0, ViewSize::new(400.0, 300.0));
//! let report = session.tap(ScreenPoint::new(200.0, 150.0), Some(&frame)).unwrap();
//! assert_eq!(report.result.label(2), "2.00m");
//! ```

pub mod config;
mod engine;
pub mod error;
pub mod grid;
mod session;

pub use config::{ConfigError, DistanceUnit, MeasureConfig, MeasureMode};
pub use engine::{MeasurementEngine, TapOutcome};
pub use error::{MeasureError, Result};
pub use grid::{GridCell, SampleGrid, SelectionPolicy, DEFAULT_GRID_SPACING};
pub use session::{MeasurementSession, TapReport};
pub use tapmeasure_scene::{MeasurementKind, MeasurementResult};
