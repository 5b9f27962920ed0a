//! Collection aliases tuned for the triangulation hot paths.
//!
//! Hash maps and sets use `rustc_hash`'s Fx hasher (fast, not DoS-resistant;
//! keys are always internal indices or points). Small per-insertion buffers
//! use `SmallVec` so typical cavities stay on the stack.

mod aliases;
mod buffers;
mod helpers;

pub use aliases::*;
pub use buffers::*;
pub use helpers::*;
