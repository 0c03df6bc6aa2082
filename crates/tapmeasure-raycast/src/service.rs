//! Ray-cast service contract and the adapter the measurement engine uses.

use serde::{Deserialize, Serialize};
use tapmeasure_math::Point3;
use tracing::trace;

use crate::{Frame, ScreenPoint};

/// What kind of reconstructed surface a ray cast may hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaycastTarget {
    /// Planes inferred from feature points, treated as unbounded.
    #[default]
    EstimatedPlane,
    /// Detected planes clipped to their measured extent.
    ExistingPlaneGeometry,
}

/// Orientation filter for planes accepted by a ray cast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneAlignment {
    /// Any orientation.
    #[default]
    Any,
    /// Floors, tables, ceilings.
    Horizontal,
    /// Walls.
    Vertical,
}

/// Parameters of a single hit-test request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastQuery {
    /// Surface kind to intersect.
    pub target: RaycastTarget,
    /// Accepted plane orientation.
    pub alignment: PlaneAlignment,
}

/// Scene-reconstruction service answering hit tests.
pub trait RaycastService {
    /// Intersections of the ray through `point`, nearest first.
    ///
    /// An empty result means the ray hit no surface.
    fn hit_test(&self, frame: &Frame, point: ScreenPoint, query: &RaycastQuery) -> Vec<Point3>;
}

impl<T: RaycastService + ?Sized> RaycastService for &T {
    fn hit_test(&self, frame: &Frame, point: ScreenPoint, query: &RaycastQuery) -> Vec<Point3> {
        (**self).hit_test(frame, point, query)
    }
}

impl<T: RaycastService + ?Sized> RaycastService for Box<T> {
    fn hit_test(&self, frame: &Frame, point: ScreenPoint, query: &RaycastQuery) -> Vec<Point3> {
        (**self).hit_test(frame, point, query)
    }
}

/// Turns screen points into world points through a [`RaycastService`].
#[derive(Debug, Clone)]
pub struct RaycastAdapter<R> {
    service: R,
    query: RaycastQuery,
}

impl<R: RaycastService> RaycastAdapter<R> {
    /// Adapter issuing estimated-plane, any-alignment queries.
    pub fn new(service: R) -> Self {
        Self::with_query(service, RaycastQuery::default())
    }

    /// Adapter issuing `query` for every cast.
    pub fn with_query(service: R, query: RaycastQuery) -> Self {
        Self { service, query }
    }

    /// World position of the nearest surface under `point`, or `None` on a miss.
    pub fn cast_ray(&self, point: ScreenPoint, frame: &Frame) -> Option<Point3> {
        let hit = self
            .service
            .hit_test(frame, point, &self.query)
            .into_iter()
            .next();
        match &hit {
            Some(p) => trace!(x = point.x, y = point.y, ?p, "ray cast hit"),
            None => trace!(x = point.x, y = point.y, "ray cast miss"),
        }
        hit
    }
}
