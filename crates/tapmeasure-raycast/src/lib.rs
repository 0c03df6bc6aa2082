#![warn(missing_docs)]

//! Screen-point ray casting for AR measurement.
//!
//! This crate turns 2D taps into 3D world points by querying a scene
//! reconstruction for the nearest surface under the tap.
//!
//! # Architecture
//!
//! - [`Frame`] - Camera pose snapshot plus view geometry for one instant
//! - [`FrameSource`] - Supplier of the latest frame
//! - [`RaycastService`] - External hit-test contract (nearest hit first)
//! - [`RaycastAdapter`] - Takes the first hit, or reports a miss as `None`
//! - [`PlaneScene`] - Reference reconstruction built from detected planes
//!
//! # Example
//!
//! ```
//! use tapmeasure_math::Point3;
//! use tapmeasure_raycast::{
//!     CameraPose, DetectedPlane, Frame, PlaneScene, RaycastAdapter, ScreenPoint, ViewSize,
//! };
//!
//! let scene = PlaneScene::new().with_plane(DetectedPlane::wall(-2.0));
//! let frame = Frame::new(CameraPose::at(Point3::origin()), 0.0, ViewSize::new(400.0, 300.0));
//!
//! let adapter = RaycastAdapter::new(scene);
//! let hit = adapter.cast_ray(ScreenPoint::new(200.0, 150.0), &frame);
//! assert!(hit.is_some());
//! ```

mod frame;
mod plane_scene;
mod ray;
mod service;

pub use frame::{CameraPose, Frame, FrameSource, ScreenPoint, ViewSize, DEFAULT_VERTICAL_FOV};
pub use plane_scene::{intersect_plane, DetectedPlane, PlaneHit, PlaneScene, ALIGNMENT_TOLERANCE};
pub use ray::Ray;
pub use service::{PlaneAlignment, RaycastAdapter, RaycastQuery, RaycastService, RaycastTarget};
