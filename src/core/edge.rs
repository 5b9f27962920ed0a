//! Canonical undirected edge identifiers.
//!
//! Edges are not stored explicitly; they are inferred from triangles. An
//! [`EdgeKey`] identifies an edge purely by its two endpoint indices and
//! canonicalizes their order so `(a, b)` and `(b, a)` map to the same edge.
//! The Bowyer-Watson builder counts `EdgeKey`s to find cavity boundaries.

/// Canonical identifier for an undirected edge between two vertex indices.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::edge::EdgeKey;
///
/// let edge = EdgeKey::new(7, 2);
/// assert_eq!(edge, EdgeKey::new(2, 7));
/// assert!(EdgeKey::new(1, 9) < EdgeKey::new(2, 3));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    v0: u32,
    v1: u32,
}

impl EdgeKey {
    /// Creates a canonical edge key with `v0 <= v1`.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }
}
