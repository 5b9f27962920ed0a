//! Bowyer-Watson algorithm for planar Delaunay triangulation.
//!
//! # Algorithm Overview
//!
//! 1. **Super-triangle**: seed the working triangulation with one synthetic
//!    triangle that encloses every input point. Its vertices take working
//!    indices `0..3`; input point `i` becomes working vertex `i + 3`.
//! 2. **Incremental insertion**: for each input point `p`, in input order:
//!    - collect the triangles in conflict with `p` (see below) into the
//!      cavity, marking the ones that contain `p` as *anchors*;
//!    - the cavity boundary is every undirected edge used by exactly one
//!      cavity triangle, found by counting [`EdgeKey`]s;
//!    - while some boundary edge is not strictly visible from `p`, repair the
//!      cavity (see [`BowyerWatson`]);
//!    - remove the cavity and connect `p` to each boundary edge.
//! 3. **Cleanup**: drop every triangle that references a super vertex and
//!    shift the remaining indices back to input positions.
//!
//! # Super vertices
//!
//! The super vertices are not points. Each one is the limit `t·d` as
//! `t → ∞` of a fixed direction `d`, with the three directions in
//! counter-clockwise order. The conflict test for a triangle depends on how
//! many super vertices it has:
//!
//! | Super vertices | `p` conflicts when |
//! |---|---|
//! | 0 | `p` lies in the closed circumcircle ([`point_in_circumcircle`]) |
//! | 1 | `p` lies left of the finite edge `a → b`, or strictly inside segment `ab` |
//! | 2 | `p` lies in the open half-plane the finite apex bounds, tie broken along its axis |
//! | 3 | always |
//!
//! These are the leading terms of the in-circle determinant as `t` grows,
//! with the directions rotated by an infinitesimal angle to break ties. The
//! 1- and 2-vertex tests are exact, so the finite triangles always cover the
//! convex hull of the input, collinear hull points included.
//!
//! Boundary edges keep the direction they had in the cavity triangle that
//! contributed them. Every created triangle `(u, v, p)` with finite `u` and
//! `v` satisfies `orientation(u, v, p) == POSITIVE`, so the output is
//! counter-clockwise and fully determined by the input order.
//!
//! # Invariants
//!
//! | Invariant | Where |
//! |---|---|
//! | Empty circumcircle | `find_bad_triangles()` collects every conflicting triangle before `p` is connected |
//! | Indices in `[0, N)` | `finish()` drops super-vertex triangles and shifts by 3 |
//! | Positive area | `repair_cavity()` leaves only finite boundary edges strictly visible from `p`; exact duplicates are never inserted |
//!
//! # References
//!
//! - **Bowyer, A.** "Computing Dirichlet tessellations." *The Computer Journal* 24.2 (1981): 162-166.
//!   DOI: [10.1093/comjnl/24.2.162](https://doi.org/10.1093/comjnl/24.2.162)
//!
//! - **Watson, D.F.** "Computing the n-dimensional Delaunay tessellation with application to
//!   Voronoi polytopes." *The Computer Journal* 24.2 (1981): 167-172.
//!   DOI: [10.1093/comjnl/24.2.167](https://doi.org/10.1093/comjnl/24.2.167)
//!
//! - **de Berg, M., Cheong, O., van Kreveld, M., and Overmars, M.**
//!   *Computational Geometry: Algorithms and Applications.* 3rd ed. Springer-Verlag, 2008.
//!   Chapter 9: Delaunay Triangulations. ISBN: 978-3-540-77973-5
//!
//! - **Shewchuk, J.R.** "Adaptive Precision Floating-Point Arithmetic and Fast Robust
//!   Geometric Predicates." *Discrete & Computational Geometry* 18.3 (1997): 305-363.
//!
//! # Examples
//!
//! ```rust
//! use triangulator::core::algorithms::bowyer_watson::BowyerWatson;
//! use triangulator::core::traits::TriangulationAlgorithm;
//! use triangulator::core::triangle::Triangle;
//! use triangulator::geometry::point::Point;
//!
//! let points = [
//!     Point::new([0.0f32, 0.0]),
//!     Point::new([1.0, 0.0]),
//!     Point::new([0.0, 1.0]),
//! ];
//! let mut algorithm = BowyerWatson::new();
//! let triangles = algorithm.triangulate(&points).unwrap();
//! assert_eq!(triangles.len(), 1);
//! assert_eq!(triangles[0].normalized(), Triangle::new(0, 1, 2));
//! ```

use std::cmp::Ordering;

use crate::core::collections::{
    BadTriangleBuffer, CavityBoundaryBuffer, EdgeCountMap, FastHashMap,
    fast_hash_map_with_capacity,
};
use crate::core::edge::EdgeKey;
use crate::core::traits::triangulation_algorithm::{
    InsertionStatistics, TriangulationAlgorithm, TriangulationError,
};
use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::predicates::{Orientation, orientation, sign_of_sum};
use crate::geometry::util::circumcircle::{Circumcircle, circumcircle, point_in_circumcircle};

/// Number of synthetic vertices prepended to the working vertex list.
pub const SUPER_VERTEX_COUNT: u32 = 3;

/// Directions of the super vertices, counter-clockwise.
const SUPER_DIRECTIONS: [[f64; 2]; 3] = [[-1.0, -1.0], [1.0, -1.0], [0.0, 2.0]];

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Tuning knobs for [`BowyerWatson`].
///
/// # Examples
///
/// ```rust
/// use triangulator::core::algorithms::bowyer_watson::{
///     BowyerWatsonConfig, BowyerWatsonConfigBuilder,
/// };
///
/// let config = BowyerWatsonConfigBuilder::default()
///     .skip_duplicates(false)
///     .build()
///     .unwrap();
/// assert!(!config.skip_duplicates);
/// assert!(BowyerWatsonConfig::default().skip_duplicates);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BowyerWatsonConfig {
    /// Skip points exactly equal to an earlier point. When `false`, such a
    /// point fails the build with [`TriangulationError::DuplicatePoint`].
    #[builder(default = "true")]
    pub skip_duplicates: bool,
}

impl Default for BowyerWatsonConfig {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
        }
    }
}

// =============================================================================
// WORKING STATE
// =============================================================================

/// Where a point must lie to conflict with a working triangle.
#[derive(Clone, Copy, Debug)]
enum ConflictRegion {
    /// No super vertex. `None` marks a collinear triangle.
    Circle(Option<Circumcircle>),
    /// One super vertex, opposite the finite edge `a → b`.
    HalfPlane { a: u32, b: u32 },
    /// Two super vertices `from → to` following the finite `apex`.
    Wedge { apex: u32, from: u32, to: u32 },
    /// The initial super-triangle.
    Everything,
}

/// How an inserted point relates to one working triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Membership {
    Outside,
    /// In conflict; may leave the cavity during repair.
    Conflict,
    /// Contains the point, or is a super triangle in conflict with it.
    Anchor,
}

/// A triangle of the working triangulation with its cached conflict region.
#[derive(Clone, Copy, Debug)]
struct WorkingTriangle {
    triangle: Triangle,
    region: ConflictRegion,
}

impl WorkingTriangle {
    fn new(triangle: Triangle, vertices: &[Point<f64>]) -> Self {
        let [x, y, z] = triangle.vertices();
        let region = match triangle.vertices().map(is_super) {
            [false, false, false] => ConflictRegion::Circle(circumcircle(
                input_vertex(vertices, x),
                input_vertex(vertices, y),
                input_vertex(vertices, z),
            )),
            [false, false, true] => ConflictRegion::HalfPlane { a: x, b: y },
            [true, false, false] => ConflictRegion::HalfPlane { a: y, b: z },
            [false, true, false] => ConflictRegion::HalfPlane { a: z, b: x },
            [false, true, true] => ConflictRegion::Wedge {
                apex: x,
                from: y,
                to: z,
            },
            [true, false, true] => ConflictRegion::Wedge {
                apex: y,
                from: z,
                to: x,
            },
            [true, true, false] => ConflictRegion::Wedge {
                apex: z,
                from: x,
                to: y,
            },
            [true, true, true] => ConflictRegion::Everything,
        };
        Self { triangle, region }
    }

    const fn is_finite(&self) -> bool {
        matches!(self.region, ConflictRegion::Circle(_))
    }

    fn membership(&self, vertices: &[Point<f64>], point: &Point<f64>) -> Membership {
        let conflict = match self.region {
            ConflictRegion::Circle(circle) => {
                if triangle_contains(&self.triangle, vertices, point) {
                    return Membership::Anchor;
                }
                circle.is_some_and(|circle| point_in_circumcircle(point, &circle))
            }
            ConflictRegion::HalfPlane { a, b } => {
                let (a, b) = (input_vertex(vertices, a), input_vertex(vertices, b));
                match orientation(a, b, point) {
                    Orientation::POSITIVE => true,
                    Orientation::DEGENERATE => strictly_between(a, b, point),
                    Orientation::NEGATIVE => false,
                }
            }
            ConflictRegion::Wedge { apex, from, to } => {
                wedge_contains(input_vertex(vertices, apex), from, to, point)
            }
            ConflictRegion::Everything => true,
        };
        match (conflict, self.is_finite()) {
            (false, _) => Membership::Outside,
            (true, true) => Membership::Conflict,
            (true, false) => Membership::Anchor,
        }
    }
}

/// Buffers reused across insertions to avoid per-point allocation.
#[derive(Debug, Default)]
struct CavityBuffers {
    bad_triangles: BadTriangleBuffer,
    anchors: BadTriangleBuffer,
    edge_counts: EdgeCountMap,
    boundary: CavityBoundaryBuffer,
}

impl CavityBuffers {
    fn clear(&mut self) {
        self.bad_triangles.clear();
        self.anchors.clear();
        self.edge_counts.clear();
        self.boundary.clear();
    }
}

// =============================================================================
// ALGORITHM
// =============================================================================

/// Bowyer-Watson Delaunay builder.
///
/// Keeps only configuration, statistics and scratch buffers between calls;
/// each [`triangulate`](TriangulationAlgorithm::triangulate) call starts from
/// a fresh super-triangle.
///
/// # Cavity repair
///
/// The circumcircle test for finite triangles rounds, so a nearly cocircular
/// point may pull in a triangle it cannot see, or miss one it must. A
/// boundary edge hidden from `p` is fixed in one of two ways:
///
/// - its owner is not an anchor: the owner leaves the cavity;
/// - its owner is an anchor: the triangle across the edge joins the cavity
///   and becomes an anchor itself.
///
/// Anchors never leave, and each growth step adds a new one, so there are at
/// most as many growth steps as working triangles, with at most one
/// shrinking step per cavity triangle in between. The repair always ends.
#[derive(Debug, Default)]
pub struct BowyerWatson {
    config: BowyerWatsonConfig,
    stats: InsertionStatistics,
    buffers: CavityBuffers,
}

impl BowyerWatson {
    /// Creates a builder with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use triangulator::core::algorithms::bowyer_watson::BowyerWatson;
    ///
    /// let algorithm = BowyerWatson::new();
    /// assert_eq!(algorithm.statistics().points_inserted, 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with a custom configuration.
    #[must_use]
    pub fn with_config(config: BowyerWatsonConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BowyerWatsonConfig {
        &self.config
    }

    /// Returns the statistics accumulated so far.
    #[must_use]
    pub const fn statistics(&self) -> &InsertionStatistics {
        &self.stats
    }

    fn validate_input(points: &[Point<f32>]) -> Result<(), TriangulationError> {
        if points.len() < 3 {
            return Err(TriangulationError::InsufficientVertices {
                count: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TriangulationError::NonFiniteCoordinate { index });
        }
        let fits = u32::try_from(points.len())
            .ok()
            .and_then(|n| n.checked_add(SUPER_VERTEX_COUNT))
            .is_some();
        if !fits {
            return Err(TriangulationError::IndexOverflow {
                count: points.len(),
            });
        }
        Ok(())
    }

    /// Collects the cavity for `point` into `bad_triangles` and its anchors
    /// into `anchors`, both ascending.
    fn find_bad_triangles(
        &mut self,
        triangles: &[WorkingTriangle],
        vertices: &[Point<f64>],
        point: &Point<f64>,
    ) {
        let CavityBuffers {
            bad_triangles,
            anchors,
            ..
        } = &mut self.buffers;
        for (i, t) in triangles.iter().enumerate() {
            match t.membership(vertices, point) {
                Membership::Outside => {}
                Membership::Conflict => bad_triangles.push(i),
                Membership::Anchor => {
                    bad_triangles.push(i);
                    anchors.push(i);
                }
            }
        }
    }

    /// Collects the edges used by exactly one bad triangle, first-seen direction.
    ///
    /// Returns the first finite boundary edge `point` does not see strictly
    /// from the inside, with the position of the bad triangle it belongs to.
    fn find_cavity_boundary(
        &mut self,
        triangles: &[WorkingTriangle],
        vertices: &[Point<f64>],
        point: &Point<f64>,
    ) -> Option<(usize, u32, u32)> {
        let CavityBuffers {
            bad_triangles,
            edge_counts,
            boundary,
            ..
        } = &mut self.buffers;
        edge_counts.clear();
        boundary.clear();

        for &i in bad_triangles.iter() {
            for key in triangles[i].triangle.edge_keys() {
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }
        for &i in bad_triangles.iter() {
            for (u, v) in triangles[i].triangle.edges() {
                if edge_counts.get(&EdgeKey::new(u, v)) != Some(&1) {
                    continue;
                }
                let hidden = !(is_super(u) || is_super(v))
                    && orientation(input_vertex(vertices, u), input_vertex(vertices, v), point)
                        != Orientation::POSITIVE;
                if hidden {
                    return Some((i, u, v));
                }
                boundary.push((u, v));
            }
        }
        None
    }

    /// Shrinks or grows the cavity until `point` sees every finite boundary edge.
    fn repair_cavity(
        &mut self,
        triangles: &[WorkingTriangle],
        vertices: &[Point<f64>],
        point: &Point<f64>,
        index: usize,
    ) -> Result<(), TriangulationError> {
        while let Some((owner, u, v)) = self.find_cavity_boundary(triangles, vertices, point) {
            let CavityBuffers {
                bad_triangles,
                anchors,
                ..
            } = &mut self.buffers;
            if anchors.binary_search(&owner).is_err() {
                tracing::trace!(index, owner, "boundary edge hidden; shrinking cavity");
                bad_triangles.retain(|i| *i != owner);
                continue;
            }
            let across = triangles
                .iter()
                .position(|t| t.triangle.edges().contains(&(v, u)))
                .ok_or(TriangulationError::CavityNotStarShaped { index })?;
            tracing::trace!(index, across, "boundary edge hidden behind anchor; growing cavity");
            insert_sorted(bad_triangles, across);
            insert_sorted(anchors, across);
        }
        Ok(())
    }

    /// Inserts working vertex `vertex` (input position `index`).
    fn insert_vertex(
        &mut self,
        triangles: &mut Vec<WorkingTriangle>,
        vertices: &[Point<f64>],
        vertex: u32,
        index: usize,
    ) -> Result<(), TriangulationError> {
        let point = input_vertex(vertices, vertex);
        self.buffers.clear();

        self.find_bad_triangles(triangles, vertices, point);
        if self.buffers.anchors.is_empty() {
            return Err(TriangulationError::EmptyCavity { index });
        }
        self.repair_cavity(triangles, vertices, point, index)?;

        // Descending order keeps the remaining positions valid under swap_remove.
        for &i in self.buffers.bad_triangles.iter().rev() {
            triangles.swap_remove(i);
        }
        triangles.extend(
            self.buffers
                .boundary
                .iter()
                .map(|&(u, v)| WorkingTriangle::new(Triangle::new(u, v, vertex), vertices)),
        );

        let removed = self.buffers.bad_triangles.len();
        let created = self.buffers.boundary.len();
        self.stats.record_insertion(created, removed);
        tracing::trace!(index, removed, created, "inserted point");
        Ok(())
    }

    /// Drops super-vertex triangles and shifts indices back to input positions.
    fn finish(triangles: &[WorkingTriangle]) -> Result<Vec<Triangle>, TriangulationError> {
        let result: Vec<Triangle> = triangles
            .iter()
            .filter_map(|t| t.triangle.shifted_down(SUPER_VERTEX_COUNT))
            .collect();
        if result.is_empty() {
            return Err(TriangulationError::NoTriangles);
        }
        Ok(result)
    }
}

#[inline]
const fn is_super(vertex: u32) -> bool {
    vertex < SUPER_VERTEX_COUNT
}

/// Coordinates of a finite working vertex; `vertices` holds the inputs only.
#[inline]
fn input_vertex(vertices: &[Point<f64>], vertex: u32) -> &Point<f64> {
    &vertices[(vertex - SUPER_VERTEX_COUNT) as usize]
}

fn insert_sorted(buffer: &mut BadTriangleBuffer, value: usize) {
    let at = buffer.partition_point(|&i| i < value);
    buffer.insert(at, value);
}

/// Returns `true` if `point` lies in the closed finite triangle `t`.
fn triangle_contains(t: &Triangle, vertices: &[Point<f64>], point: &Point<f64>) -> bool {
    t.edges().iter().all(|&(u, v)| {
        orientation(input_vertex(vertices, u), input_vertex(vertices, v), point)
            != Orientation::NEGATIVE
    })
}

/// Returns `true` if `point`, collinear with `a` and `b`, lies strictly between them.
fn strictly_between(a: &Point<f64>, b: &Point<f64>, point: &Point<f64>) -> bool {
    let (lo, hi, at) = if a.x() == b.x() {
        (a.y().min(b.y()), a.y().max(b.y()), point.y())
    } else {
        (a.x().min(b.x()), a.x().max(b.x()), point.x())
    };
    lo < at && at < hi
}

/// `|d_from|² d_to - |d_to|² d_from`: the leading axis of a two-super-vertex circle.
fn wedge_axis(from: u32, to: u32) -> [f64; 2] {
    let [fx, fy] = SUPER_DIRECTIONS[from as usize];
    let [tx, ty] = SUPER_DIRECTIONS[to as usize];
    let (nf, nt) = (fx * fx + fy * fy, tx * tx + ty * ty);
    [nf * tx - nt * fx, nf * ty - nt * fy]
}

/// Conflict test for the triangle `(apex, from, to)` with two super vertices.
///
/// Inside when `w × (apex - point) > 0` for the wedge axis `w`; on the line,
/// inside when `point` lies ahead of `apex` along `w`. The axis components
/// are small powers of two, so every product below is exact.
fn wedge_contains(apex: &Point<f64>, from: u32, to: u32, point: &Point<f64>) -> bool {
    let [wx, wy] = wedge_axis(from, to);
    let side = sign_of_sum(&[
        wx * apex.y(),
        -(wx * point.y()),
        -(wy * apex.x()),
        wy * point.x(),
    ]);
    match side {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            sign_of_sum(&[
                wx * point.x(),
                -(wx * apex.x()),
                wy * point.y(),
                -(wy * apex.y()),
            ]) == Ordering::Greater
        }
    }
}

impl TriangulationAlgorithm for BowyerWatson {
    fn triangulate(&mut self, points: &[Point<f32>]) -> Result<Vec<Triangle>, TriangulationError> {
        Self::validate_input(points)?;
        tracing::debug!(
            points = points.len(),
            skip_duplicates = self.config.skip_duplicates,
            "starting Bowyer-Watson build"
        );

        let vertices: Vec<Point<f64>> = points.iter().copied().map(Point::<f64>::from).collect();

        let mut triangles = Vec::with_capacity(2 * points.len() + 1);
        triangles.push(WorkingTriangle::new(Triangle::new(0, 1, 2), &vertices));

        let mut first_seen: FastHashMap<Point<f32>, usize> =
            fast_hash_map_with_capacity(points.len());
        let mut duplicates = 0_usize;

        for ((index, point), vertex) in points.iter().enumerate().zip(SUPER_VERTEX_COUNT..) {
            if let Some(&first) = first_seen.get(point) {
                if !self.config.skip_duplicates {
                    return Err(TriangulationError::DuplicatePoint { index, first });
                }
                duplicates += 1;
                self.stats.record_duplicate();
                tracing::trace!(index, first, "skipping duplicate point");
                continue;
            }
            first_seen.insert(*point, index);
            self.insert_vertex(&mut triangles, &vertices, vertex, index)?;
        }

        let result = Self::finish(&triangles)?;
        tracing::debug!(
            points = points.len(),
            duplicates,
            processed_total = self.stats.points_processed(),
            working_triangles = triangles.len(),
            triangles = result.len(),
            "Bowyer-Watson build complete"
        );
        Ok(result)
    }

    fn statistics(&self) -> InsertionStatistics {
        self.stats
    }

    fn reset(&mut self) {
        self.stats.reset();
        self.buffers.clear();
    }
}
