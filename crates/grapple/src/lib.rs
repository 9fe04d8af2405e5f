//! Headless drag-and-drop interaction tracking.
//!
//! Grapple holds the parts of a drag-and-drop UI that do not depend on any
//! particular toolkit:
//!
//! - [`DragTracker`]: the per-gesture state machine. It accumulates the pointer
//!   offset, classifies the drag through caller callbacks and resolves the drop.
//! - [`DropZoneRegistry`]: maps drop-zone ids to screen rectangles and hit-tests
//!   pointer locations against them.
//! - [`GestureButton`] / [`DraggableButton`]: press, long press, double tap,
//!   repeat and drag actions for button-like controls.
//!
//! A front end feeds pointer events in and maps [`DragState`] and the drag offset
//! to whatever colors and animations it likes.
//!
//! # Quick Start
//!
//! ```
//! use grapple::{DragState, DragTracker, DropZoneRegistry, Rect, Vec2};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Instant;
//!
//! let zones = Rc::new(RefCell::new(DropZoneRegistry::new()));
//! zones.borrow_mut().set_zone("tray", Rect::new(0.0, 0.0, 100.0, 100.0));
//!
//! let classify_zones = Rc::clone(&zones);
//! let resolve_zones = Rc::clone(&zones);
//! let mut tracker = DragTracker::builder()
//!     .classify(move |loc| {
//!         if classify_zones.borrow().zone_contains(&"tray", loc) {
//!             DragState::Accepted
//!         } else {
//!             DragState::Rejected
//!         }
//!     })
//!     .resolve(move |loc| resolve_zones.borrow().zone_contains(&"tray", loc))
//!     .build()
//!     .unwrap();
//!
//! tracker.on_press_start(Vec2::new(200.0, 200.0), Instant::now());
//! tracker.on_move(Vec2::new(50.0, 50.0));
//! assert_eq!(tracker.state(), DragState::Accepted);
//! assert!(tracker.on_release(Vec2::new(50.0, 50.0)).unwrap().accepted);
//! ```

pub mod button;
pub mod callback;
pub mod config;
pub mod error;
pub mod payload;
pub mod registry;
pub mod state;
pub mod tracker;

pub use button::{
    ButtonActions, ButtonRelease, DragValue, DraggableButton, DraggableRelease, GestureButton,
    REPEAT_INTERVAL,
};
pub use callback::{Classifier, Resolver};
pub use config::{GestureConfig, GestureConfigBuilder};
pub use error::{ConfigError, ConfigResult};
pub use payload::Draggable;
pub use registry::{
    DropArea, DropAreaSink, DropZoneRegistry, GeometryChange, SharedDropZoneRegistry,
};
pub use state::{DragEvent, DragState, DropResult, OffsetReset, Transition};
pub use tracker::{DragTracker, DragTrackerBuilder};

pub use grapple_core::geometry::Rect;
pub use grapple_core::math::Vec2;
