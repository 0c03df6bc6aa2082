//! Per-frame camera snapshot and screen-space types.

use serde::{Deserialize, Serialize};
use tapmeasure_math::{Point3, Transform, Vec3};

use crate::Ray;

/// Default vertical field of view (radians) for frames built without intrinsics.
pub const DEFAULT_VERTICAL_FOV: f64 = std::f64::consts::FRAC_PI_3;

/// A 2D point in view coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the view the user taps on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSize {
    /// View width.
    pub width: f64,
    /// View height.
    pub height: f64,
}

impl ViewSize {
    /// Create a new view size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pose of the observing device for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    /// Camera-to-world transform. The camera looks down local -Z.
    pub transform: Transform,
}

impl CameraPose {
    /// Pose from a camera-to-world transform.
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    /// Camera positioned at `position` with identity orientation.
    pub fn at(position: Point3) -> Self {
        Self::new(Transform::translation(position.x, position.y, position.z))
    }

    /// World position of the camera.
    pub fn position(&self) -> Point3 {
        self.transform.origin()
    }

}

/// Read-only snapshot of the AR session at a single instant.
///
/// Only valid for the duration of the call it is passed to; the rendering
/// subsystem replaces it every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Camera pose for this frame.
    pub camera: CameraPose,
    /// Capture time in seconds.
    pub timestamp: f64,
    /// Size of the view the frame is displayed in.
    pub view: ViewSize,
    /// Vertical field of view in radians.
    pub vertical_fov: f64,
}

impl Frame {
    /// Build a frame with the default field of view.
    pub fn new(camera: CameraPose, timestamp: f64, view: ViewSize) -> Self {
        Self {
            camera,
            timestamp,
            view,
            vertical_fov: DEFAULT_VERTICAL_FOV,
        }
    }

    /// Override the vertical field of view.
    pub fn with_vertical_fov(mut self, vertical_fov: f64) -> Self {
        self.vertical_fov = vertical_fov;
        self
    }

    /// Whether the view and field of view admit a pinhole projection.
    pub fn is_projectable(&self) -> bool {
        self.view.width > 0.0
            && self.view.height > 0.0
            && self.vertical_fov > 0.0
            && self.vertical_fov < std::f64::consts::PI
    }

    /// Pinhole ray from the camera through `point`.
    ///
    /// `None` for an empty view, a field of view outside `(0, pi)`, or a
    /// non-finite tap position.
    pub fn screen_ray(&self, point: ScreenPoint) -> Option<Ray> {
        if !self.is_projectable() || !(point.x.is_finite() && point.y.is_finite()) {
            return None;
        }
        let focal = (self.view.height / 2.0) / (self.vertical_fov / 2.0).tan();
        let local = Vec3::new(
            (point.x - self.view.width / 2.0) / focal,
            -(point.y - self.view.height / 2.0) / focal,
            -1.0,
        );
        let direction = self.camera.transform.apply_vec(&local);
        if !direction.iter().all(|c| c.is_finite()) || direction.norm() == 0.0 {
            return None;
        }
        Some(Ray::new(self.camera.position(), direction))
    }
}

/// Supplier of the latest camera frame.
pub trait FrameSource {
    /// The most recent frame, or `None` if nothing has been captured yet.
    fn current_frame(&self) -> Option<Frame>;
}

impl FrameSource for Option<Frame> {
    fn current_frame(&self) -> Option<Frame> {
        self.clone()
    }
}

impl FrameSource for Frame {
    fn current_frame(&self) -> Option<Frame> {
        Some(self.clone())
    }
}
