//! Builder module: The string builder and the pieces it is made of.
//!
//! This module contains:
//! - [`StringBuilder`]: The growable, cache-backed character buffer
//! - [`grown_capacity`]: The amortized-doubling growth policy
//! - [`Case`]: Comparison mode for searches
//! - [`DecimalInt`]: Integers accepted by the allocation-free renderer

#[allow(clippy::module_inception)]
mod builder;
mod numeric;
mod search;
mod storage;

pub use builder::{BuilderConfig, StringBuilder};
pub use numeric::DecimalInt;
pub use search::Case;
pub use storage::{grown_capacity, DEFAULT_CAPACITY};
