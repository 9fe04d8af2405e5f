//! Vector math re-exported from [`glam`].
//!
//! Pointer locations, translations and drag offsets are all [`Vec2`] values in a
//! single global coordinate space.
//!
//! ```
//! use grapple_core::math::Vec2;
//!
//! let start = Vec2::new(10.0, 20.0);
//! let pointer = Vec2::new(40.0, 25.0);
//! assert_eq!(pointer - start, Vec2::new(30.0, 5.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::Vec2;
