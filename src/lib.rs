//! # Strand
//!
//! A garbage-free string builder for text assembled in hot loops.
//!
//! Strand is built for code that rebuilds short strings every frame
//! (status lines, counters, labels) and wants to do it without a fresh
//! heap allocation per update.
//!
//! ## Core Concepts
//!
//! - **Reusable buffer**: One character buffer that grows by doubling and keeps its capacity across `clear()`
//! - **Cached view**: The rendered `String` is built lazily and reused until the next edit
//! - **Allocation-free numbers**: Integers and floats are rendered digit by digit straight into the buffer
//! - **In-place edits**: Insert, remove and replace shift characters in place
//!
//! ## Example
//!
//! ```rust
//! use strand::{Case, StringBuilder};
//!
//! let mut sb = StringBuilder::new();
//! for frame in 0..3 {
//!     sb.clear().append("frame ").append_int(frame).append(" dt=").append_f32(16.5);
//! }
//! assert_eq!(sb.as_str(), "frame 2 dt=16.5");
//! assert_eq!(sb.index_of("DT", 0, Case::Insensitive), Some(8));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod builder;
pub mod error;

// Re-exports for convenience
pub use builder::{grown_capacity, BuilderConfig, Case, DecimalInt, StringBuilder, DEFAULT_CAPACITY};
pub use error::{BuilderError, Result};
