use super::{FastBuildHasher, FastHashMap};

/// Creates a [`FastHashMap`] with pre-allocated capacity.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::collections::fast_hash_map_with_capacity;
///
/// let map = fast_hash_map_with_capacity::<u64, usize>(100);
/// assert!(map.capacity() >= 100);
/// ```
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}
