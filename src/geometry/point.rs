//! Two-dimensional points.
//!
//! # Special Floating-Point Equality Semantics
//!
//! Point equality treats `NaN` as equal to itself and `0.0` as equal to `-0.0`,
//! so that points satisfy `Eq` and can be used as keys in hash-based
//! collections (the Bowyer-Watson builder relies on this for duplicate
//! detection). Wire round-trips are still exact: the codec moves raw `f32`
//! bit patterns, never going through this comparison.
//!
//! If you need IEEE 754 equality, compare [`Point::x`]/[`Point::y`] directly.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::{CoordinateScalar, FiniteCheck};
use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A point in the plane with coordinates of scalar type `T`.
///
/// Wire points are `Point<f32>`; the geometry kernel works on `Point<f64>`
/// (see the lossless `From<Point<f32>>` conversion). Coordinates are private,
/// so a point is immutable once created.
///
/// # Examples
///
/// ```rust
/// use triangulator::geometry::point::Point;
///
/// let p = Point::new([1.0f32, 2.0]);
/// assert_eq!(p.x(), 1.0);
/// assert_eq!(p.y(), 2.0);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Point<T>
where
    T: CoordinateScalar,
{
    coords: [T; 2],
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl<T> Point<T>
where
    T: CoordinateScalar,
{
    /// Creates a point from `[x, y]`.
    #[inline]
    #[must_use]
    pub const fn new(coords: [T; 2]) -> Self {
        Self { coords }
    }

    /// The x coordinate.
    #[inline]
    #[must_use]
    pub fn x(&self) -> T {
        self.coords[0]
    }

    /// The y coordinate.
    #[inline]
    #[must_use]
    pub fn y(&self) -> T {
        self.coords[1]
    }

    /// Borrows the coordinates as `[x, y]`.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; 2] {
        &self.coords
    }

    /// Returns `true` if both coordinates are finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use triangulator::geometry::point::Point;
    ///
    /// assert!(Point::new([0.0f32, 1.0]).is_finite());
    /// assert!(!Point::new([f32::NAN, 1.0]).is_finite());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(FiniteCheck::is_finite_generic)
    }

    /// Euclidean distance to `other`, computed with `hypot`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use triangulator::geometry::point::Point;
    ///
    /// let a = Point::new([0.0f64, 0.0]);
    /// let b = Point::new([3.0f64, 4.0]);
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> T {
        (self.x() - other.x()).hypot(self.y() - other.y())
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl<T> Hash for Point<T>
where
    T: CoordinateScalar,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        for coord in &self.coords {
            coord.hash_coordinate(state);
        }
    }
}

impl<T> PartialEq for Point<T>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a.ordered_eq(b))
    }
}

impl<T> Eq for Point<T> where T: CoordinateScalar {}

impl<T> Default for Point<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self {
            coords: [T::default(); 2],
        }
    }
}

// Non-finite values have no JSON number representation: NaN goes out as
// `null`, infinities as the strings "Infinity" / "-Infinity".
impl<T> Serialize for Point<T>
where
    T: CoordinateScalar,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(2)?;
        for coord in &self.coords {
            if coord.is_finite_generic() {
                tuple.serialize_element(coord)?;
            } else if coord.is_infinite() {
                if coord.is_sign_positive() {
                    tuple.serialize_element("Infinity")?;
                } else {
                    tuple.serialize_element("-Infinity")?;
                }
            } else {
                tuple.serialize_element(&Option::<T>::None)?;
            }
        }
        tuple.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CoordRepr<T> {
    Num(T),
    Str(String),
    Null,
}

impl<'de, T> Deserialize<'de> for Point<T>
where
    T: CoordinateScalar,
{
    fn deserialize<DE>(deserializer: DE) -> Result<Self, DE::Error>
    where
        DE: serde::Deserializer<'de>,
    {
        struct PairVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for PairVisitor<T>
        where
            T: CoordinateScalar,
        {
            type Value = Point<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(
                    "a pair of coordinates (numbers, null, \"Infinity\", \"-Infinity\" or \"NaN\")",
                )
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut coords = [T::zero(); 2];
                for (i, slot) in coords.iter_mut().enumerate() {
                    let element: CoordRepr<T> = seq
                        .next_element()?
                        .ok_or_else(|| Error::invalid_length(i, &self))?;
                    *slot = match element {
                        CoordRepr::Num(value) => value,
                        CoordRepr::Null => T::nan(),
                        CoordRepr::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                            "infinity" | "inf" => T::infinity(),
                            "-infinity" | "-inf" => T::neg_infinity(),
                            "nan" => T::nan(),
                            _ => {
                                return Err(Error::custom(format!(
                                    "Unknown special value: {s}"
                                )));
                            }
                        },
                    };
                }
                Ok(Point::new(coords))
            }
        }

        deserializer.deserialize_tuple(2, PairVisitor(PhantomData))
    }
}

// =============================================================================
// TYPE CONVERSION IMPLEMENTATIONS
// =============================================================================

/// Widening conversion from wire precision to kernel precision. Exact.
impl From<Point<f32>> for Point<f64> {
    #[inline]
    fn from(point: Point<f32>) -> Self {
        Self::new([f64::from(point.x()), f64::from(point.y())])
    }
}

impl<T> From<[T; 2]> for Point<T>
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(coords: [T; 2]) -> Self {
        Self::new(coords)
    }
}

impl<T> From<(T, T)> for Point<T>
where
    T: CoordinateScalar,
{
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self::new([x, y])
    }
}

impl<T> From<Point<T>> for [T; 2]
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(point: Point<T>) -> [T; 2] {
        point.coords
    }
}
