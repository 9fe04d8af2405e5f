//! Grapple Core
//!
//! Shared math, geometry, collection and logging utilities used by the
//! Grapple interaction crates.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
