//! Circumcircle calculations for planar triangles.
//!
//! This module provides the circumcircle of a triangle and the in-circle
//! predicate used by the Bowyer-Watson builder to find the triangles an
//! inserted point invalidates.

use crate::geometry::point::Point;

/// The circle passing through the three vertices of a triangle.
///
/// Derived per triangle during a build and never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circumcircle {
    /// Center of the circle.
    pub center: Point<f64>,
    /// Radius of the circle (distance from the center to the first vertex).
    pub radius: f64,
}

impl Circumcircle {
    /// Returns `true` if `point` lies inside or on this circle.
    ///
    /// Shorthand for [`point_in_circumcircle`].
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point<f64>) -> bool {
        point_in_circumcircle(point, self)
    }
}

/// Calculate the circumcircle of the triangle `(p1, p2, p3)`.
///
/// Uses the closed-form determinant solution:
///
/// ```text
/// d  = 2 (x1 (y2 - y3) + x2 (y3 - y1) + x3 (y1 - y2))
/// ux = ((x1² + y1²)(y2 - y3) + (x2² + y2²)(y3 - y1) + (x3² + y3²)(y1 - y2)) / d
/// uy = ((x1² + y1²)(x3 - x2) + (x2² + y2²)(x1 - x3) + (x3² + y3²)(x2 - x1)) / d
/// ```
///
/// The radius is the distance from `(ux, uy)` to `p1`.
///
/// # Returns
///
/// `None` when `d` is exactly zero (the three points are collinear and have
/// no finite circumcenter). The test is an exact comparison: nearly collinear
/// triangles may or may not take this path depending on rounding, and then
/// yield a very large circle instead.
///
/// # Example
///
/// ```
/// use triangulator::geometry::point::Point;
/// use triangulator::geometry::util::circumcircle;
///
/// let circle = circumcircle(
///     &Point::new([0.0, 0.0]),
///     &Point::new([2.0, 0.0]),
///     &Point::new([0.0, 2.0]),
/// )
/// .unwrap();
/// assert_eq!(circle.center, Point::new([1.0, 1.0]));
/// assert!((circle.radius - 2.0_f64.sqrt()).abs() < 1e-12);
///
/// // Collinear points have no circumcircle.
/// assert!(circumcircle(
///     &Point::new([0.0, 0.0]),
///     &Point::new([1.0, 1.0]),
///     &Point::new([2.0, 2.0]),
/// )
/// .is_none());
/// ```
#[must_use]
pub fn circumcircle(p1: &Point<f64>, p2: &Point<f64>, p3: &Point<f64>) -> Option<Circumcircle> {
    let [x1, y1] = *p1.coords();
    let [x2, y2] = *p2.coords();
    let [x3, y3] = *p3.coords();

    let d = 2.0 * (x1 * (y2 - y3) + x2 * (y3 - y1) + x3 * (y1 - y2));
    if d == 0.0 {
        return None;
    }

    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;

    let ux = (s1 * (y2 - y3) + s2 * (y3 - y1) + s3 * (y1 - y2)) / d;
    let uy = (s1 * (x3 - x2) + s2 * (x1 - x3) + s3 * (x2 - x1)) / d;

    let center = Point::new([ux, uy]);
    let radius = center.distance(p1);
    Some(Circumcircle { center, radius })
}

/// Returns `true` iff `point` lies inside the circle or exactly on its boundary.
///
/// The boundary is inclusive: a point at exactly `radius` from the center is
/// treated as inside, which makes Bowyer-Watson remove the triangle rather than
/// miss a violation on floating-point ties.
///
/// # Example
///
/// ```
/// use triangulator::geometry::point::Point;
/// use triangulator::geometry::util::{Circumcircle, point_in_circumcircle};
///
/// let circle = Circumcircle { center: Point::new([0.0, 0.0]), radius: 5.0 };
/// assert!(point_in_circumcircle(&Point::new([1.0, 1.0]), &circle));
/// assert!(point_in_circumcircle(&Point::new([3.0, 4.0]), &circle)); // on the boundary
/// assert!(!point_in_circumcircle(&Point::new([4.0, 4.0]), &circle));
/// ```
#[inline]
#[must_use]
pub fn point_in_circumcircle(point: &Point<f64>, circle: &Circumcircle) -> bool {
    circle.center.distance(point) <= circle.radius
}
