//! General helper utilities.

pub mod uuid;

pub use self::uuid::*;
