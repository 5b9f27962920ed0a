//! Scalar abstraction for point coordinates.
//!
//! Points travel over the wire as `f32` and are processed by the geometry
//! kernel as `f64`. Both go through [`CoordinateScalar`], which bundles the
//! floating-point behavior the crate relies on: finiteness checks, NaN-aware
//! equality and consistent hashing (both backed by [`OrderedFloat`]).

use num_traits::Float;
use ordered_float::OrderedFloat;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Finiteness check usable in generic code.
///
/// # Examples
///
/// ```
/// use triangulator::geometry::traits::coordinate::FiniteCheck;
///
/// assert!(1.0f32.is_finite_generic());
/// assert!(!f32::NAN.is_finite_generic());
/// assert!(!f64::NEG_INFINITY.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite_generic(&self) -> bool;
}

/// Equality where NaN equals itself and `0.0 == -0.0`.
///
/// # Examples
///
/// ```
/// use triangulator::geometry::traits::coordinate::OrderedEq;
///
/// assert!(f64::NAN.ordered_eq(&f64::NAN));
/// assert!(0.0f32.ordered_eq(&(-0.0f32)));
/// assert!(!1.0f64.ordered_eq(&2.0f64));
/// ```
pub trait OrderedEq {
    /// Compares two values with ordered (total) equality semantics.
    fn ordered_eq(&self, other: &Self) -> bool;
}

/// Hashing for floating-point coordinates, consistent with [`OrderedEq`].
pub trait HashCoordinate {
    /// Feeds this coordinate into `state`.
    fn hash_coordinate<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_coordinate_traits {
    (float: $($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline(always)]
                fn is_finite_generic(&self) -> bool {
                    self.is_finite()
                }
            }

            impl OrderedEq for $t {
                #[inline(always)]
                fn ordered_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                }
            }

            impl HashCoordinate for $t {
                #[inline(always)]
                fn hash_coordinate<H: Hasher>(&self, state: &mut H) {
                    OrderedFloat(*self).hash(state);
                }
            }
        )*
    };
}

impl_coordinate_traits!(float: f32, f64);

/// Floating-point scalar usable as a point coordinate.
///
/// Implemented for `f32` (wire precision) and `f64` (kernel precision).
///
/// # Examples
///
/// ```
/// use triangulator::geometry::traits::coordinate::CoordinateScalar;
///
/// fn midpoint<T: CoordinateScalar>(a: T, b: T) -> T {
///     (a + b) / (T::one() + T::one())
/// }
///
/// assert_eq!(midpoint(1.0f32, 2.0), 1.5);
/// assert_eq!(midpoint(-4.0f64, 4.0), 0.0);
/// ```
pub trait CoordinateScalar:
    Float
    + OrderedEq
    + HashCoordinate
    + FiniteCheck
    + Default
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

impl CoordinateScalar for f32 {}

impl CoordinateScalar for f64 {}
