//! A scene reconstruction made of detected planes.
//!
//! Stands in for the platform's scene-understanding service when there is no
//! live AR runtime: hit tests cast the pinhole ray of the frame through the
//! screen point and intersect it with every plane.

use tapmeasure_math::{Dir3, Point2, Point3, Vec3};

use crate::{Frame, PlaneAlignment, RaycastQuery, RaycastService, RaycastTarget, Ray, ScreenPoint};

/// Planes whose normal is within this angle (radians) of world up count as horizontal.
pub const ALIGNMENT_TOLERANCE: f64 = 10.0 * std::f64::consts::PI / 180.0;

/// A plane detected in the physical environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPlane {
    /// Center of the plane.
    pub origin: Point3,
    /// Unit vector along the plane's u direction.
    pub x_dir: Dir3,
    /// Unit vector along the plane's v direction.
    pub y_dir: Dir3,
    /// Unit normal (x_dir × y_dir).
    pub normal_dir: Dir3,
    /// Half-extents along `x_dir` and `y_dir`, if the plane's boundary is known.
    pub half_extent: Option<Point2>,
}

impl DetectedPlane {
    /// Unbounded plane through `origin` with the given normal.
    ///
    /// X/Y directions are chosen arbitrarily.
    pub fn new(origin: Point3, normal: Vec3) -> Self {
        let n = Dir3::new_normalize(normal);
        let arbitrary = if n.as_ref().x.abs() < 0.9 {
            Vec3::x()
        } else {
            Vec3::y()
        };
        let x = Dir3::new_normalize(arbitrary.cross(n.as_ref()));
        let y = Dir3::new_normalize(n.as_ref().cross(x.as_ref()));
        Self {
            origin,
            x_dir: x,
            y_dir: y,
            normal_dir: n,
            half_extent: None,
        }
    }

    /// Horizontal plane at height `y`.
    pub fn floor(y: f64) -> Self {
        Self::new(Point3::new(0.0, y, 0.0), Vec3::y())
    }

    /// Vertical plane `z = z` facing the default camera.
    pub fn wall(z: f64) -> Self {
        Self::new(Point3::new(0.0, 0.0, z), Vec3::z())
    }

    /// Limit the plane to `±half_u` along `x_dir` and `±half_v` along `y_dir`.
    pub fn with_extent(mut self, half_u: f64, half_v: f64) -> Self {
        self.half_extent = Some(Point2::new(half_u.abs(), half_v.abs()));
        self
    }

    /// Project a 3D point onto the plane's (u, v) coordinates.
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p - self.origin;
        Point2::new(d.dot(self.x_dir.as_ref()), d.dot(self.y_dir.as_ref()))
    }

    /// Whether the plane is close enough to level to count as horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.normal_dir.as_ref().dot(&Vec3::y()).abs() >= ALIGNMENT_TOLERANCE.cos()
    }

    /// Whether the plane is close enough to upright to count as vertical.
    pub fn is_vertical(&self) -> bool {
        self.normal_dir.as_ref().dot(&Vec3::y()).abs() <= ALIGNMENT_TOLERANCE.sin()
    }

    /// Whether a query with `alignment` may hit this plane.
    pub fn matches(&self, alignment: PlaneAlignment) -> bool {
        match alignment {
            PlaneAlignment::Any => true,
            PlaneAlignment::Horizontal => self.is_horizontal(),
            PlaneAlignment::Vertical => self.is_vertical(),
        }
    }

    /// Whether `uv` lies inside the plane's extent. Unbounded planes contain everything.
    pub fn contains(&self, uv: &Point2) -> bool {
        match self.half_extent {
            Some(half) => uv.x.abs() <= half.x && uv.y.abs() <= half.y,
            None => true,
        }
    }
}

/// Result of a ray-plane intersection.
#[derive(Debug, Clone, Copy)]
pub struct PlaneHit {
    /// Parameter along the ray.
    pub t: f64,
    /// World position of the intersection.
    pub point: Point3,
    /// Plane parameter coordinates (u, v).
    pub uv: Point2,
}

/// Intersect a ray with a plane.
///
/// Returns `Some(hit)` if the ray intersects the plane at a finite,
/// non-negative t, or `None` if the ray is parallel to the plane, intersects
/// behind the origin, or carries non-finite components.
pub fn intersect_plane(ray: &Ray, plane: &DetectedPlane) -> Option<PlaneHit> {
    let normal = plane.normal_dir.as_ref();
    let denom = ray.direction.as_ref().dot(normal);

    if !(denom.abs() >= 1e-12) {
        return None;
    }

    let t = (plane.origin - ray.origin).dot(normal) / denom;
    if !(t.is_finite() && t >= 0.0) {
        return None;
    }

    let point = ray.at(t);
    let uv = plane.project(&point);
    Some(PlaneHit { t, point, uv })
}

/// A set of detected planes answering hit tests.
#[derive(Debug, Clone, Default)]
pub struct PlaneScene {
    planes: Vec<DetectedPlane>,
}

impl PlaneScene {
    /// Empty scene; every hit test misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detected plane.
    pub fn add_plane(&mut self, plane: DetectedPlane) -> &mut Self {
        self.planes.push(plane);
        self
    }

    /// Builder form of [`add_plane`](Self::add_plane).
    pub fn with_plane(mut self, plane: DetectedPlane) -> Self {
        self.planes.push(plane);
        self
    }

    /// Detected planes in insertion order.
    pub fn planes(&self) -> &[DetectedPlane] {
        &self.planes
    }

    /// All plane hits along `ray` accepted by `query`, sorted by distance.
    pub fn trace(&self, ray: &Ray, query: &RaycastQuery) -> Vec<PlaneHit> {
        let mut hits: Vec<PlaneHit> = self
            .planes
            .iter()
            .filter(|plane| plane.matches(query.alignment))
            .filter_map(|plane| {
                let hit = intersect_plane(ray, plane)?;
                match query.target {
                    RaycastTarget::EstimatedPlane => Some(hit),
                    RaycastTarget::ExistingPlaneGeometry => plane.contains(&hit.uv).then_some(hit),
                }
            })
            .collect();
        hits.sort_by(|a, b| a.t.total_cmp(&b.t));
        hits
    }
}

impl RaycastService for PlaneScene {
    fn hit_test(&self, frame: &Frame, point: ScreenPoint, query: &RaycastQuery) -> Vec<Point3> {
        let Some(ray) = frame.screen_ray(point) else {
            return Vec::new();
        };
        self.trace(&ray, query).into_iter().map(|h| h.point).collect()
    }
}
