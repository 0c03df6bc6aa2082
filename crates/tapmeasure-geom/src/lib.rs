#![warn(missing_docs)]

//! Pure geometry for tap-driven AR measurement.
//!
//! Everything here is a plain function over world points:
//!
//! - [`distance`] - Euclidean distance between two points
//! - [`triangle_area`] - Heron's formula, clamped against rounding error
//! - [`strip_area`] - area of an ordered point list split into a triangle strip
//! - [`centroid`] - arithmetic mean of a non-empty point set

pub mod error;

pub use error::{GeometryError, Result};

use tapmeasure_math::{Point3, Vec3};

/// Euclidean distance between `a` and `b`.
#[inline]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Area of the triangle `(p0, p1, p2)` using Heron's formula.
///
/// The radicand is clamped to zero before the square root, so collinear or
/// coincident points yield `0.0` rather than `NaN`.
pub fn triangle_area(p0: &Point3, p1: &Point3, p2: &Point3) -> f64 {
    let d01 = distance(p0, p1);
    let d12 = distance(p1, p2);
    let d20 = distance(p2, p0);
    let s = (d01 + d12 + d20) / 2.0;
    let radicand = s * (s - d01) * (s - d12) * (s - d20);
    radicand.max(0.0).sqrt()
}

/// Total area of an ordered point list decomposed as a triangle strip.
///
/// Triangles are `(p[k], p[k+1], p[k+2])` for every `k`, so four points
/// `p0..p3` give `(p0, p1, p2) + (p1, p2, p3)`.
pub fn strip_area(points: &[Point3]) -> Result<f64> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            required: 3,
            found: points.len(),
        });
    }
    Ok(points
        .windows(3)
        .map(|w| triangle_area(&w[0], &w[1], &w[2]))
        .sum())
}

/// Arithmetic mean of `points`.
pub fn centroid(points: &[Point3]) -> Result<Point3> {
    if points.is_empty() {
        return Err(GeometryError::EmptyInput);
    }
    let sum = points
        .iter()
        .fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Ok(Point3::from(sum / points.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_zero_to_self() {
        let a = Point3::new(0.3, -1.2, 4.5);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(-4.0, 0.5, 7.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn test_distance_pythagorean() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(distance(&a, &b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_area_right_triangle() {
        let area = triangle_area(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(area, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_area_permutation_invariant() {
        let a = Point3::new(0.1, 0.2, -1.0);
        let b = Point3::new(1.3, -0.4, -1.2);
        let c = Point3::new(0.7, 0.9, -0.8);
        let reference = triangle_area(&a, &b, &c);
        for (p, q, r) in [(&a, &c, &b), (&b, &a, &c), (&b, &c, &a), (&c, &a, &b), (&c, &b, &a)] {
            assert_relative_eq!(triangle_area(p, q, r), reference, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_triangle_area_collinear_is_zero() {
        let area = triangle_area(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
        );
        assert!(!area.is_nan());
        assert!(area.abs() < 1e-9);
    }

    #[test]
    fn test_triangle_area_coincident_is_zero() {
        let p = Point3::new(0.5, 0.5, 0.5);
        let area = triangle_area(&p, &p, &p);
        assert_eq!(area, 0.0);
    }

    #[test]
    fn test_triangle_area_nearly_collinear_not_nan() {
        // Rounding can push the radicand slightly negative here.
        let area = triangle_area(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(0.1, 0.2, 0.3),
            &Point3::new(0.3, 0.6, 0.9),
        );
        assert!(area.is_finite());
        assert!(area < 1e-6);
    }

    #[test]
    fn test_strip_area_unit_square() {
        // Ordered so the shared edge p1-p2 is the diagonal.
        let points = [
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
        ];
        assert_relative_eq!(strip_area(&points).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_strip_area_single_triangle() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        assert_relative_eq!(strip_area(&points).unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_strip_area_too_few_points() {
        let points = [Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert_eq!(
            strip_area(&points),
            Err(GeometryError::TooFewPoints {
                required: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_centroid_triangle() {
        let c = centroid(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(c.x, 2.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, 2.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(c.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_empty() {
        assert_eq!(centroid(&[]), Err(GeometryError::EmptyInput));
    }
}
