//! Press/drag/release gesture buttons.
//!
//! [`GestureButton`] turns raw press, drag and release events into higher level
//! button actions: press, release inside or outside, long press, double tap,
//! repeat and drag callbacks. [`DraggableButton`] pairs a button with a
//! [`DragTracker`] so the same press can also be dragged onto a drop zone.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use grapple_core::geometry::Rect;
use grapple_core::math::Vec2;

use crate::config::GestureConfig;
use crate::error::ConfigResult;
use crate::state::{DragState, DropResult};
use crate::tracker::DragTracker;

/// Interval between repeat actions once a held press starts repeating.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(100);

pub type Action = Box<dyn FnMut()>;
pub type DragAction = Box<dyn FnMut(DragValue)>;

/// Snapshot of a drag passed to drag actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragValue {
    /// Where the press started.
    pub start: Vec2,
    /// Current pointer location.
    pub location: Vec2,
    /// `location - start`.
    pub translation: Vec2,
}

impl DragValue {
    fn new(start: Vec2, location: Vec2) -> Self {
        Self {
            start,
            location,
            translation: location - start,
        }
    }
}

/// Optional callbacks fired by a [`GestureButton`].
#[derive(Default)]
pub struct ButtonActions {
    press: Option<Action>,
    release_inside: Option<Action>,
    release_outside: Option<Action>,
    long_press: Option<Action>,
    double_tap: Option<Action>,
    repeat: Option<Action>,
    drag_start: Option<DragAction>,
    drag: Option<DragAction>,
    drag_end: Option<DragAction>,
    end: Option<Action>,
}

impl ButtonActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.press = Some(Box::new(f));
        self
    }

    pub fn on_release_inside(mut self, f: impl FnMut() + 'static) -> Self {
        self.release_inside = Some(Box::new(f));
        self
    }

    pub fn on_release_outside(mut self, f: impl FnMut() + 'static) -> Self {
        self.release_outside = Some(Box::new(f));
        self
    }

    pub fn on_long_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.long_press = Some(Box::new(f));
        self
    }

    pub fn on_double_tap(mut self, f: impl FnMut() + 'static) -> Self {
        self.double_tap = Some(Box::new(f));
        self
    }

    pub fn on_repeat(mut self, f: impl FnMut() + 'static) -> Self {
        self.repeat = Some(Box::new(f));
        self
    }

    pub fn on_drag_start(mut self, f: impl FnMut(DragValue) + 'static) -> Self {
        self.drag_start = Some(Box::new(f));
        self
    }

    pub fn on_drag(mut self, f: impl FnMut(DragValue) + 'static) -> Self {
        self.drag = Some(Box::new(f));
        self
    }

    pub fn on_drag_end(mut self, f: impl FnMut(DragValue) + 'static) -> Self {
        self.drag_end = Some(Box::new(f));
        self
    }

    /// Fired after every release, whatever else fired.
    pub fn on_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.end = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ButtonActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonActions")
            .field("press", &self.press.is_some())
            .field("release_inside", &self.release_inside.is_some())
            .field("release_outside", &self.release_outside.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("double_tap", &self.double_tap.is_some())
            .field("repeat", &self.repeat.is_some())
            .field("drag_start", &self.drag_start.is_some())
            .field("drag", &self.drag.is_some())
            .field("drag_end", &self.drag_end.is_some())
            .field("end", &self.end.is_some())
            .finish()
    }
}

fn fire(action: &mut Option<Action>) {
    if let Some(action) = action.as_mut() {
        action();
    }
}

fn fire_drag(action: &mut Option<DragAction>, value: DragValue) {
    if let Some(action) = action.as_mut() {
        action(value);
    }
}

#[derive(Debug, Clone, Copy)]
struct PressState {
    start: Vec2,
    pressed_at: Instant,
    last_drag: Option<DragValue>,
    long_press_fired: bool,
    last_repeat: Option<Instant>,
}

/// What happened when a [`GestureButton`] was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRelease {
    /// The release location was inside the button bounds.
    pub inside: bool,
    /// The press was dragged before release.
    pub dragged: bool,
    /// This release completed a double tap.
    pub double_tap: bool,
}

/// Press/drag/release tracker for a button-like control.
pub struct GestureButton {
    actions: ButtonActions,
    bounds: Rect<f32>,
    config: Arc<GestureConfig>,
    press: Option<PressState>,
    last_tap: Option<Instant>,
}

impl GestureButton {
    pub fn new(actions: ButtonActions) -> Self {
        Self {
            actions,
            bounds: Rect::default(),
            config: GestureConfig::shared(),
            press: None,
            last_tap: None,
        }
    }

    pub fn with_config(mut self, config: Arc<GestureConfig>) -> ConfigResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_bounds(mut self, bounds: Rect<f32>) -> Self {
        self.bounds = bounds;
        self
    }

    /// Update the on-screen bounds used to tell inside from outside releases.
    pub fn set_bounds(&mut self, bounds: Rect<f32>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect<f32> {
        self.bounds
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.last_drag.is_some())
    }

    pub fn config(&self) -> &Arc<GestureConfig> {
        &self.config
    }

    pub fn press(&mut self, location: Vec2, now: Instant) {
        if self.press.is_some() {
            tracing::warn!("Button pressed while already pressed; restarting press");
        }
        self.press = Some(PressState {
            start: location,
            pressed_at: now,
            last_drag: None,
            long_press_fired: false,
            last_repeat: None,
        });
        tracing::trace!(?location, "Button pressed");
        fire(&mut self.actions.press);
    }

    /// Advance time for a held press.
    ///
    /// Fires the long-press action once `long_press_delay` has elapsed and the
    /// repeat action every [`REPEAT_INTERVAL`] once `repeat_delay` has elapsed.
    /// Neither fires once the press has become a drag.
    pub fn tick(&mut self, now: Instant) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if press.last_drag.is_some() {
            return;
        }

        let held = now.saturating_duration_since(press.pressed_at);

        if !press.long_press_fired && held >= self.config.long_press_delay {
            press.long_press_fired = true;
            tracing::debug!(?held, "Button long press");
            fire(&mut self.actions.long_press);
        }

        if held >= self.config.repeat_delay {
            let due = press
                .last_repeat
                .is_none_or(|last| now.saturating_duration_since(last) >= REPEAT_INTERVAL);
            if due {
                press.last_repeat = Some(now);
                fire(&mut self.actions.repeat);
            }
        }
    }

    /// Feed a drag sample for the current press.
    pub fn drag(&mut self, location: Vec2) {
        let Some(press) = self.press.as_mut() else {
            tracing::warn!(?location, "Button dragged while not pressed; ignoring");
            return;
        };

        let value = DragValue::new(press.start, location);
        let first = press.last_drag.is_none();
        press.last_drag = Some(value);

        if first {
            fire_drag(&mut self.actions.drag_start, value);
        }
        fire_drag(&mut self.actions.drag, value);
    }

    /// Release the current press at `location`.
    pub fn release(&mut self, location: Vec2, now: Instant) -> Option<ButtonRelease> {
        let Some(press) = self.press.take() else {
            tracing::warn!(?location, "Button released while not pressed; ignoring");
            return None;
        };

        let dragged = press.last_drag.is_some();
        if dragged {
            fire_drag(
                &mut self.actions.drag_end,
                DragValue::new(press.start, location),
            );
        }

        let inside = self.bounds.contains(location);
        let mut double_tap = false;
        if inside {
            fire(&mut self.actions.release_inside);

            if dragged {
                self.last_tap = None;
            } else {
                double_tap = self.last_tap.is_some_and(|last| {
                    now.saturating_duration_since(last) <= self.config.double_tap_timeout
                });
                if double_tap {
                    self.last_tap = None;
                    tracing::debug!("Button double tap");
                    fire(&mut self.actions.double_tap);
                } else {
                    self.last_tap = Some(now);
                }
            }
        } else {
            self.last_tap = None;
            fire(&mut self.actions.release_outside);
        }

        fire(&mut self.actions.end);

        Some(ButtonRelease {
            inside,
            dragged,
            double_tap,
        })
    }

    /// Drop the current press without firing release actions.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}

impl fmt::Debug for GestureButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureButton")
            .field("actions", &self.actions)
            .field("bounds", &self.bounds)
            .field("is_pressed", &self.is_pressed())
            .finish_non_exhaustive()
    }
}

/// Result of releasing a [`DraggableButton`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraggableRelease {
    pub button: Option<ButtonRelease>,
    pub drop: Option<DropResult>,
}

/// A [`GestureButton`] whose press can also be dragged and dropped.
///
/// Every event is forwarded to both the button and its [`DragTracker`].
#[derive(Debug)]
pub struct DraggableButton {
    button: GestureButton,
    tracker: DragTracker,
}

impl DraggableButton {
    pub fn new(button: GestureButton, tracker: DragTracker) -> Self {
        Self { button, tracker }
    }

    pub fn press(&mut self, location: Vec2, now: Instant) {
        self.button.press(location, now);
        self.tracker.on_press_start(location, now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.button.tick(now);
        self.tracker.tick(now);
    }

    pub fn drag(&mut self, location: Vec2) {
        self.button.drag(location);
        self.tracker.on_move(location);
    }

    pub fn release(&mut self, location: Vec2, now: Instant) -> DraggableRelease {
        let button = self.button.release(location, now);
        let drop = self.tracker.on_release(location);
        DraggableRelease { button, drop }
    }

    pub fn state(&self) -> DragState {
        self.tracker.state()
    }

    pub fn offset(&self) -> Vec2 {
        self.tracker.offset()
    }

    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    pub fn button(&self) -> &GestureButton {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut GestureButton {
        &mut self.button
    }

    pub fn tracker(&self) -> &DragTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut DragTracker {
        &mut self.tracker
    }
}
