use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// `HashMap` using the Fx hasher.
///
/// ⚠️ **Not DoS-resistant**: use only with internal keys.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::collections::FastHashMap;
///
/// let mut map: FastHashMap<u32, usize> = FastHashMap::default();
/// map.insert(3, 1);
/// assert_eq!(map.get(&3), Some(&1));
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// `HashSet` using the Fx hasher.
pub type FastHashSet<T> = FxHashSet<T>;

/// Build hasher shared by [`FastHashMap`] and [`FastHashSet`].
pub type FastBuildHasher = FxBuildHasher;

/// Stack-first vector with `N` inline slots, spilling to the heap when full.
///
/// # Examples
///
/// ```rust
/// use triangulator::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<u32, 4> = SmallBuffer::new();
/// buffer.extend([1, 2, 3]);
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;
