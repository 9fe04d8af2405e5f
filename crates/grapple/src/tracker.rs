//! Drag gesture state machine.
//!
//! A [`DragTracker`] follows one pointer gesture at a time:
//! press → move* → release. Each move asks the registered [`Classifier`] for the
//! current [`DragState`]; the release asks the [`Resolver`] whether the drop was
//! accepted. Long-press gating holds the drag back as [`DragState::Unavailable`]
//! until a long press has armed it.
//!
//! ```
//! use grapple::{DragState, DragTracker};
//! use grapple_core::math::Vec2;
//! use std::time::Instant;
//!
//! let mut tracker = DragTracker::builder()
//!     .classify(|loc| if loc.x > 100.0 { DragState::Accepted } else { DragState::Rejected })
//!     .resolve(|loc| loc.x > 100.0)
//!     .build()
//!     .unwrap();
//!
//! tracker.on_press_start(Vec2::ZERO, Instant::now());
//! tracker.on_move(Vec2::new(150.0, 50.0));
//! assert_eq!(tracker.state(), DragState::Accepted);
//!
//! let drop = tracker.on_release(Vec2::new(150.0, 50.0)).unwrap();
//! assert!(drop.accepted);
//! assert_eq!(tracker.state(), DragState::None);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use grapple_core::math::Vec2;
use grapple_core::profile_function;

use crate::callback::{Classifier, Resolver};
use crate::config::GestureConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::payload::Draggable;
use crate::state::{DragEvent, DragState, DropResult, OffsetReset, Transition};

type Observer = Box<dyn FnMut(&DragEvent)>;

/// Per-gesture bookkeeping, recreated on every press.
#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    start: Vec2,
    pressed_at: Instant,
    long_press_done: bool,
    /// Set once a move sample has been honored.
    moved: bool,
}

impl ActiveGesture {
    fn new(start: Vec2, pressed_at: Instant) -> Self {
        Self {
            start,
            pressed_at,
            long_press_done: false,
            moved: false,
        }
    }
}

/// Tracks the lifecycle of a drag gesture and classifies it through caller
/// callbacks.
pub struct DragTracker {
    classifier: Classifier,
    resolver: Resolver,
    payload: Option<Box<dyn Draggable>>,
    long_press_gated: bool,
    config: Arc<GestureConfig>,
    observer: Option<Observer>,

    gesture: Option<ActiveGesture>,
    state: DragState,
    offset: Vec2,
    is_dragging: bool,
    last_drop: Option<DropResult>,
}

impl DragTracker {
    pub fn builder() -> DragTrackerBuilder {
        DragTrackerBuilder::default()
    }

    /// Current drag classification.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Cumulative pointer translation since the gesture started.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Whether a drag is in progress (armed by a long press or by an honored move).
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether a gesture has been pressed and not yet released.
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_long_press_gated(&self) -> bool {
        self.long_press_gated
    }

    /// Outcome of the most recent resolved drop.
    pub fn last_drop(&self) -> Option<DropResult> {
        self.last_drop
    }

    pub fn payload(&self) -> Option<&dyn Draggable> {
        self.payload.as_deref()
    }

    pub fn config(&self) -> &Arc<GestureConfig> {
        &self.config
    }

    /// Begin a new gesture at `location`.
    ///
    /// A press that arrives while an earlier gesture never saw its release discards
    /// the stale gesture first.
    pub fn on_press_start(&mut self, location: Vec2, now: Instant) {
        if self.gesture.is_some() {
            tracing::warn!("Press started while a gesture was still active; discarding it");
            self.reset();
        }

        tracing::trace!(?location, "Drag gesture started");
        self.gesture = Some(ActiveGesture::new(location, now));
        self.clear_offset();
    }

    /// Advance time for the active gesture.
    ///
    /// Completes the long press once `long_press_delay` has elapsed since the press.
    /// Returns true if this call armed the drag.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        if gesture.long_press_done {
            return false;
        }
        if now.saturating_duration_since(gesture.pressed_at) < self.config.long_press_delay {
            return false;
        }
        self.on_long_press()
    }

    /// Signal that the active press qualified as a long press.
    ///
    /// With long-press gating enabled and no drag yet in progress, this arms the
    /// drag: the state becomes `Unknown` and subsequent moves are honored. Returns
    /// true if the drag was armed.
    pub fn on_long_press(&mut self) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            tracing::warn!("Long press completed with no active gesture; ignoring");
            return false;
        };
        gesture.long_press_done = true;

        if !(self.long_press_gated && self.state == DragState::None) {
            return false;
        }

        tracing::debug!("Long press armed drag");
        self.is_dragging = true;
        self.set_state(DragState::Unknown, Transition::Immediate);
        true
    }

    /// Feed a pointer movement sample.
    pub fn on_move(&mut self, location: Vec2) {
        profile_function!();

        let Some(gesture) = self.gesture.as_mut() else {
            tracing::warn!(?location, "Pointer moved with no active gesture; ignoring");
            return;
        };

        if self.state.is_unavailable()
            || (self.long_press_gated && self.state == DragState::None)
        {
            tracing::trace!(?location, "Drag not armed; movement ignored");
            self.set_state(DragState::Unavailable, Transition::Immediate);
            return;
        }

        gesture.moved = true;
        let start = gesture.start;

        self.is_dragging = true;
        self.offset = location - start;
        self.emit(DragEvent::OffsetChanged(self.offset));

        let next = self.classifier.classify(self.payload.as_deref(), location);
        tracing::trace!(?location, offset = ?self.offset, state = ?next, "Drag moved");
        let transition = Transition::Linear(self.config.state_change_transition);
        self.set_state(next, transition);
    }

    /// Finish the active gesture at `location`.
    ///
    /// Returns the resolved drop, or `None` when the drag was unavailable, was never
    /// armed or moved, or there was no active gesture. The gesture ends and the
    /// offset returns to zero in every case.
    pub fn on_release(&mut self, location: Vec2) -> Option<DropResult> {
        profile_function!();

        let Some(gesture) = self.gesture.take() else {
            tracing::warn!(?location, "Pointer released with no active gesture; ignoring");
            return None;
        };
        self.is_dragging = false;

        if self.state.is_unavailable() {
            tracing::debug!("Unavailable drag released; no drop resolved");
            self.set_state(DragState::None, Transition::Immediate);
            self.clear_offset();
            return None;
        }

        // A long-press-armed drag resolves even without movement; a bare tap does not.
        if !gesture.moved && self.state == DragState::None {
            self.clear_offset();
            return None;
        }

        let accepted = self.resolver.resolve(self.payload.as_deref(), location);
        let result = DropResult {
            accepted,
            location,
            offset_reset: OffsetReset::for_outcome(accepted),
        };
        tracing::debug!(?location, accepted, "Drop resolved");

        let transition = Transition::Linear(self.config.state_end_transition);
        self.set_state(DragState::None, transition);
        self.offset = Vec2::ZERO;
        self.emit(DragEvent::OffsetReset(result.offset_reset));
        self.last_drop = Some(result);
        self.emit(DragEvent::Dropped(result));

        Some(result)
    }

    /// Auxiliary release reset.
    ///
    /// Fired by the secondary press recognizer whenever any release follows a
    /// press. Forces the state back to `None` without touching the offset or
    /// ending the gesture, so a later primary release still resolves.
    pub fn on_auxiliary_release(&mut self) {
        self.is_dragging = false;
        self.set_state(DragState::None, Transition::Immediate);
    }

    /// End the gesture without resolving a drop.
    pub fn reset(&mut self) {
        self.gesture = None;
        self.is_dragging = false;
        self.set_state(DragState::None, Transition::Immediate);
        self.clear_offset();
    }

    fn clear_offset(&mut self) {
        if self.offset != Vec2::ZERO {
            self.offset = Vec2::ZERO;
            self.emit(DragEvent::OffsetReset(OffsetReset::Immediate));
        }
    }

    fn set_state(&mut self, next: DragState, transition: Transition) {
        if self.state == next {
            return;
        }
        let from = self.state;
        self.state = next;
        tracing::debug!(?from, to = ?next, "Drag state changed");
        self.emit(DragEvent::StateChanged {
            from,
            to: next,
            transition,
        });
    }

    fn emit(&mut self, event: DragEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }
}

impl fmt::Debug for DragTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragTracker")
            .field("classifier", &self.classifier)
            .field("resolver", &self.resolver)
            .field("has_payload", &self.payload.is_some())
            .field("long_press_gated", &self.long_press_gated)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("is_dragging", &self.is_dragging)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DragTracker`].
///
/// Exactly one classifier and one resolver must be registered. Registering a
/// second one, or none at all, makes [`build`](Self::build) fail.
#[derive(Default)]
pub struct DragTrackerBuilder {
    classifier: Option<Classifier>,
    resolver: Option<Resolver>,
    payload: Option<Box<dyn Draggable>>,
    long_press_gated: bool,
    config: Option<Arc<GestureConfig>>,
    observer: Option<Observer>,
    error: Option<ConfigError>,
}

impl DragTrackerBuilder {
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        if self.classifier.is_some() {
            self.error.get_or_insert(ConfigError::AmbiguousClassifier);
        } else {
            self.classifier = Some(classifier);
        }
        self
    }

    pub fn resolver(mut self, resolver: Resolver) -> Self {
        if self.resolver.is_some() {
            self.error.get_or_insert(ConfigError::AmbiguousResolver);
        } else {
            self.resolver = Some(resolver);
        }
        self
    }

    /// Register a location-only classifier.
    pub fn classify(self, f: impl FnMut(Vec2) -> DragState + 'static) -> Self {
        self.classifier(Classifier::plain(f))
    }

    /// Register a classifier that also receives the payload.
    pub fn classify_payload(
        self,
        f: impl FnMut(&dyn Draggable, Vec2) -> DragState + 'static,
    ) -> Self {
        self.classifier(Classifier::with_payload(f))
    }

    /// Register a location-only resolver.
    pub fn resolve(self, f: impl FnMut(Vec2) -> bool + 'static) -> Self {
        self.resolver(Resolver::plain(f))
    }

    /// Register a resolver that also receives the payload.
    pub fn resolve_payload(self, f: impl FnMut(&dyn Draggable, Vec2) -> bool + 'static) -> Self {
        self.resolver(Resolver::with_payload(f))
    }

    /// Register the passive callbacks: every sample is `Unknown` and every drop is
    /// rejected.
    pub fn passive(self) -> Self {
        self.classifier(Classifier::passive()).resolver(Resolver::passive())
    }

    /// Attach a payload handed to payload-form callbacks.
    pub fn payload(mut self, payload: impl Draggable) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    /// Only honor movement after a long press has armed the drag.
    pub fn long_press_gated(mut self, gated: bool) -> Self {
        self.long_press_gated = gated;
        self
    }

    pub fn config(mut self, config: Arc<GestureConfig>) -> Self {
        self.config = Some(config);
        self
    }

    /// Receive a [`DragEvent`] for every state, offset and drop change.
    pub fn observer(mut self, observer: impl FnMut(&DragEvent) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn build(self) -> ConfigResult<DragTracker> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let classifier = self.classifier.ok_or(ConfigError::MissingClassifier)?;
        let resolver = self.resolver.ok_or(ConfigError::MissingResolver)?;

        if self.payload.is_none() {
            if classifier.needs_payload() {
                return Err(ConfigError::MissingPayload {
                    callback: "classifier",
                });
            }
            if resolver.needs_payload() {
                return Err(ConfigError::MissingPayload {
                    callback: "resolver",
                });
            }
        }

        let config = self.config.unwrap_or_else(GestureConfig::shared);
        config.validate()?;

        Ok(DragTracker {
            classifier,
            resolver,
            payload: self.payload,
            long_press_gated: self.long_press_gated,
            config,
            observer: self.observer,
            gesture: None,
            state: DragState::None,
            offset: Vec2::ZERO,
            is_dragging: false,
            last_drop: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_tracker() -> DragTracker {
        DragTracker::builder()
            .classify(|loc| {
                if loc.x > 100.0 {
                    DragState::Accepted
                } else {
                    DragState::Rejected
                }
            })
            .resolve(|_| true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_callbacks() {
        let err = DragTracker::builder().resolve(|_| true).build().unwrap_err();
        assert_eq!(err, ConfigError::MissingClassifier);

        let err = DragTracker::builder()
            .classify(|_| DragState::Unknown)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingResolver);
    }

    #[test]
    fn test_ambiguous_classifier() {
        let err = DragTracker::builder()
            .payload(1u32)
            .classify(|_| DragState::Unknown)
            .classify_payload(|_, _| DragState::Unknown)
            .resolve(|_| true)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::AmbiguousClassifier);
    }

    #[test]
    fn test_ambiguous_resolver() {
        let err = DragTracker::builder()
            .passive()
            .resolve(|_| true)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::AmbiguousResolver);
    }

    #[test]
    fn test_payload_callback_without_payload() {
        let err = DragTracker::builder()
            .classify(|_| DragState::Unknown)
            .resolve_payload(|_, _| true)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingPayload {
                callback: "resolver"
            }
        );
    }

    #[test]
    fn test_move_follows_classifier() {
        let mut tracker = threshold_tracker();
        tracker.on_press_start(Vec2::ZERO, Instant::now());

        tracker.on_move(Vec2::new(50.0, 50.0));
        assert_eq!(tracker.state(), DragState::Rejected);
        assert_eq!(tracker.offset(), Vec2::new(50.0, 50.0));

        tracker.on_move(Vec2::new(150.0, 50.0));
        assert_eq!(tracker.state(), DragState::Accepted);
        assert_eq!(tracker.offset(), Vec2::new(150.0, 50.0));
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_offset_relative_to_press() {
        let mut tracker = threshold_tracker();
        tracker.on_press_start(Vec2::new(10.0, 20.0), Instant::now());
        tracker.on_move(Vec2::new(40.0, 25.0));
        assert_eq!(tracker.offset(), Vec2::new(30.0, 5.0));
    }

    #[test]
    fn test_move_without_gesture_is_noop() {
        let mut tracker = threshold_tracker();
        tracker.on_move(Vec2::new(150.0, 0.0));
        assert_eq!(tracker.state(), DragState::None);
        assert_eq!(tracker.offset(), Vec2::ZERO);
        assert!(tracker.on_release(Vec2::ZERO).is_none());
    }

    #[test]
    fn test_release_without_move_resolves_nothing() {
        let mut tracker = threshold_tracker();
        tracker.on_press_start(Vec2::ZERO, Instant::now());
        assert!(tracker.on_release(Vec2::ZERO).is_none());
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_reset_ends_gesture() {
        let mut tracker = threshold_tracker();
        tracker.on_press_start(Vec2::ZERO, Instant::now());
        tracker.on_move(Vec2::new(20.0, 0.0));

        tracker.reset();

        assert!(!tracker.is_active());
        assert_eq!(tracker.state(), DragState::None);
        assert_eq!(tracker.offset(), Vec2::ZERO);
    }

    #[test]
    fn test_new_press_discards_stale_gesture() {
        let mut tracker = threshold_tracker();
        tracker.on_press_start(Vec2::ZERO, Instant::now());
        tracker.on_move(Vec2::new(150.0, 0.0));

        tracker.on_press_start(Vec2::new(5.0, 5.0), Instant::now());

        assert_eq!(tracker.state(), DragState::None);
        assert_eq!(tracker.offset(), Vec2::ZERO);
        assert!(tracker.is_active());
    }
}
