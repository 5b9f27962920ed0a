//! Triangles as index triples into a point set.

use crate::core::edge::EdgeKey;
use serde::{Deserialize, Serialize};

/// A triangle given by three indices into an ordered point set.
///
/// The vertex order is kept exactly as produced (and exactly as found on the
/// wire); use [`Triangle::normalized`] when comparing triangles as sets.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::triangle::Triangle;
///
/// let t = Triangle::new(2, 0, 1);
/// assert_eq!(t.vertices(), [2, 0, 1]);
/// assert_eq!(t.normalized(), Triangle::new(0, 1, 2));
/// assert!(t.contains_vertex(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [u32; 3],
}

impl Triangle {
    /// Creates a triangle from three vertex indices.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the vertex indices in stored order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [u32; 3] {
        self.vertices
    }

    /// Returns the three directed edges `(a, b)`, `(b, c)`, `(c, a)`.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> [(u32, u32); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Returns the three edges as canonical [`EdgeKey`]s.
    #[inline]
    #[must_use]
    pub const fn edge_keys(&self) -> [EdgeKey; 3] {
        let [a, b, c] = self.vertices;
        [EdgeKey::new(a, b), EdgeKey::new(b, c), EdgeKey::new(c, a)]
    }

    /// Returns `true` if `vertex` is one of this triangle's indices.
    #[inline]
    #[must_use]
    pub const fn contains_vertex(&self, vertex: u32) -> bool {
        self.vertices[0] == vertex || self.vertices[1] == vertex || self.vertices[2] == vertex
    }

    /// Returns the largest vertex index.
    #[inline]
    #[must_use]
    pub fn max_vertex(&self) -> u32 {
        self.vertices[0].max(self.vertices[1]).max(self.vertices[2])
    }

    /// Returns a copy with indices sorted ascending.
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut vertices = self.vertices;
        vertices.sort_unstable();
        Self { vertices }
    }

    /// Returns a copy with every index lowered by `offset`, or `None` if any
    /// index is below `offset`.
    #[inline]
    #[must_use]
    pub fn shifted_down(&self, offset: u32) -> Option<Self> {
        let [a, b, c] = self.vertices;
        Some(Self::new(
            a.checked_sub(offset)?,
            b.checked_sub(offset)?,
            c.checked_sub(offset)?,
        ))
    }
}

impl From<[u32; 3]> for Triangle {
    #[inline]
    fn from([a, b, c]: [u32; 3]) -> Self {
        Self::new(a, b, c)
    }
}

impl From<(u32, u32, u32)> for Triangle {
    #[inline]
    fn from((a, b, c): (u32, u32, u32)) -> Self {
        Self::new(a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_vertex_order() {
        let t = Triangle::new(5, 1, 3);
        assert_eq!(t.edges(), [(5, 1), (1, 3), (3, 5)]);
        assert_eq!(
            t.edge_keys(),
            [EdgeKey::new(1, 5), EdgeKey::new(1, 3), EdgeKey::new(3, 5)]
        );
    }

    #[test]
    fn normalization_and_max() {
        let t = Triangle::from((9, 4, 6));
        assert_eq!(t.normalized().vertices(), [4, 6, 9]);
        assert_eq!(t.max_vertex(), 9);
        assert_eq!(t.vertices(), [9, 4, 6]);
    }

    #[test]
    fn shifted_down_rejects_underflow() {
        let t = Triangle::new(3, 4, 5);
        assert_eq!(t.shifted_down(3), Some(Triangle::new(0, 1, 2)));
        assert_eq!(Triangle::new(2, 4, 5).shifted_down(3), None);
    }

    #[test]
    fn serde_json_roundtrip() {
        let t = Triangle::from([0, 2, 1]);
        let json = serde_json::to_string(&t).unwrap();
        let back: Triangle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
