#![warn(missing_docs)]

//! Math types for tap-driven AR measurement.
//!
//! Thin wrappers around nalgebra providing the types shared by every
//! measurement crate: world points, vectors, directions, rigid camera
//! transforms, and tolerance constants. World units are meters.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// A point in the AR world frame.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// A 4x4 rigid transform, e.g. a camera-to-world pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Camera-to-world pose for a viewer at `eye` looking towards `target`.
    ///
    /// The camera looks down its local -Z axis with +Y up. Returns `None`
    /// when `eye == target` or `up` is parallel to the viewing direction.
    pub fn look_at(eye: &Point3, target: &Point3, up: &Vec3) -> Option<Self> {
        let forward = target - eye;
        if forward.norm() < Tolerance::DEFAULT.linear {
            return None;
        }
        let back = -forward.normalize();
        let right = up.cross(&back);
        if right.norm() < Tolerance::DEFAULT.linear {
            return None;
        }
        let right = right.normalize();
        let true_up = back.cross(&right);

        let mut m = Matrix4::identity();
        for r in 0..3 {
            m[(r, 0)] = right[r];
            m[(r, 1)] = true_up[r];
            m[(r, 2)] = back[r];
            m[(r, 3)] = eye[r];
        }
        Some(Self { matrix: m })
    }

    /// Translation column of the transform.
    ///
    /// For a camera-to-world pose this is the camera position.
    pub fn origin(&self) -> Point3 {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in meters.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 m).
    pub const DEFAULT: Self = Self { linear: 1e-9 };
}
