use super::{FastHashMap, SmallBuffer};
use crate::core::edge::EdgeKey;

/// Inline capacity for per-insertion cavity buffers.
///
/// A point inserted into a Delaunay triangulation invalidates about four
/// triangles on average; 16 covers nearly every insertion without spilling.
pub const CAVITY_BUFFER_SIZE: usize = 16;

/// Positions of the triangles invalidated by one insertion.
pub type BadTriangleBuffer = SmallBuffer<usize, CAVITY_BUFFER_SIZE>;

/// Directed boundary edges of one cavity, in first-seen order.
pub type CavityBoundaryBuffer = SmallBuffer<(u32, u32), CAVITY_BUFFER_SIZE>;

/// Occurrence count of each undirected edge across the bad triangles.
pub type EdgeCountMap = FastHashMap<EdgeKey, u32>;
