//! Orientation predicates for planar triangles.
//!
//! [`orientation`] is exact: it uses Shewchuk's adaptive-precision
//! `orient2d` from the `robust` crate, so near-degenerate configurations are
//! classified by the true sign of the determinant and not by how the plain
//! formula happens to round. The builder relies on it.
//!
//! [`signed_area`], [`triangle_area`] and [`all_collinear`] use the plain
//! floating-point formula with an exact comparison against zero and no
//! tolerance, so accepted and rejected inputs stay exactly as the arithmetic
//! dictates. For `f32` inputs widened to `f64` the plain formula is exact
//! unless coordinates differ by more than about 29 binary orders of magnitude.

use std::cmp::Ordering;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Represents the orientation of a triangle `(a, b, c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clockwise (signed area < 0)
    NEGATIVE,
    /// Collinear (signed area == 0)
    DEGENERATE,
    /// Counter-clockwise (signed area > 0)
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Twice the signed area of the triangle `(a, b, c)`.
///
/// Computed as `(b.x - a.x)(c.y - a.y) - (b.y - a.y)(c.x - a.x)`. Positive
/// for counter-clockwise triangles, zero for collinear points.
///
/// # Example
///
/// ```
/// use triangulator::geometry::point::Point;
/// use triangulator::geometry::predicates::signed_area;
///
/// let a = Point::new([0.0f64, 0.0]);
/// let b = Point::new([1.0, 0.0]);
/// let c = Point::new([0.0, 1.0]);
/// assert_eq!(signed_area(&a, &b, &c), 1.0);
/// assert_eq!(signed_area(&a, &c, &b), -1.0);
/// ```
#[inline]
#[must_use]
pub fn signed_area<T>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> T
where
    T: CoordinateScalar,
{
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

/// Unsigned area of the triangle `(a, b, c)`.
///
/// # Example
///
/// ```
/// use triangulator::geometry::point::Point;
/// use triangulator::geometry::predicates::triangle_area;
///
/// let a = Point::new([0.0f64, 0.0]);
/// let b = Point::new([2.0, 0.0]);
/// let c = Point::new([0.0, 2.0]);
/// assert_eq!(triangle_area(&a, &c, &b), 2.0);
/// ```
#[inline]
#[must_use]
pub fn triangle_area<T>(a: &Point<T>, b: &Point<T>, c: &Point<T>) -> T
where
    T: CoordinateScalar,
{
    let two = T::one() + T::one();
    signed_area(a, b, c).abs() / two
}

/// Exact orientation of `(a, b, c)`.
///
/// The sign of the adaptive-precision determinant is always correct for
/// finite inputs. Validate non-finite coordinates before relying on the result.
///
/// # Example
///
/// ```
/// use triangulator::geometry::point::Point;
/// use triangulator::geometry::predicates::{Orientation, orientation};
///
/// let a = Point::new([0.0f64, 0.0]);
/// let b = Point::new([1.0, 1.0]);
/// assert_eq!(orientation(&a, &b, &Point::new([2.0, 2.0])), Orientation::DEGENERATE);
/// assert_eq!(orientation(&a, &b, &Point::new([0.0, 1.0])), Orientation::POSITIVE);
/// assert_eq!(orientation(&a, &b, &Point::new([1.0, 0.0])), Orientation::NEGATIVE);
/// ```
#[inline]
#[must_use]
pub fn orientation(a: &Point<f64>, b: &Point<f64>, c: &Point<f64>) -> Orientation {
    let det = robust::orient2d(coord(a), coord(b), coord(c));
    if det < 0.0 {
        Orientation::NEGATIVE
    } else if det > 0.0 {
        Orientation::POSITIVE
    } else {
        Orientation::DEGENERATE
    }
}

#[inline]
fn coord(p: &Point<f64>) -> robust::Coord<f64> {
    robust::Coord { x: p.x(), y: p.y() }
}

/// Returns `true` if every point is collinear with the line through the first
/// two points (exact zero [`signed_area`] test).
///
/// Sequences with fewer than three points are trivially collinear.
///
/// # Example
///
/// ```
/// use triangulator::geometry::point::Point;
/// use triangulator::geometry::predicates::all_collinear;
///
/// let segment = [
///     Point::new([0.0f64, 0.0]),
///     Point::new([0.5, 0.5]),
///     Point::new([1.0, 1.0]),
/// ];
/// assert!(all_collinear(&segment));
///
/// let triangle = [
///     Point::new([0.0f64, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.0, 1.0]),
/// ];
/// assert!(!all_collinear(&triangle));
/// ```
#[must_use]
pub fn all_collinear<T>(points: &[Point<T>]) -> bool
where
    T: CoordinateScalar,
{
    let [first, second, rest @ ..] = points else {
        return true;
    };
    rest.iter()
        .all(|p| signed_area(first, second, p) == T::zero())
}

/// Exact sign of `terms.iter().sum()`.
///
/// Accumulates the terms into a nonoverlapping floating-point expansion
/// (Shewchuk's Grow-Expansion with zero elimination); the largest nonzero
/// component carries the sign of the exact sum. Terms must be finite.
#[must_use]
pub(crate) fn sign_of_sum(terms: &[f64]) -> Ordering {
    let mut expansion: Vec<f64> = Vec::with_capacity(terms.len() * 2);
    let mut next: Vec<f64> = Vec::with_capacity(terms.len() * 2);
    for &term in terms {
        next.clear();
        let mut q = term;
        for &e in &expansion {
            let (sum, error) = two_sum(q, e);
            if error != 0.0 {
                next.push(error);
            }
            q = sum;
        }
        if q != 0.0 {
            next.push(q);
        }
        std::mem::swap(&mut expansion, &mut next);
    }
    match expansion.last() {
        Some(&top) if top > 0.0 => Ordering::Greater,
        Some(_) => Ordering::Less,
        None => Ordering::Equal,
    }
}

/// Knuth's error-free sum: `a + b == sum + error` exactly.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let error = (a - a_virtual) + (b - b_virtual);
    (sum, error)
}
