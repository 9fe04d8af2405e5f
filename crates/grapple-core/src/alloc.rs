//! Hash collections backed by AHash.
//!
//! Drop-zone lookups and hit-test result sets use these instead of the
//! SipHash-based std collections.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
