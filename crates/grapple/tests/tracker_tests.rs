//! Drag tracker state machine tests.
//!
//! These drive a tracker through full press/move/release sequences and check
//! state, offset, resolver calls and emitted events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use grapple::{
    ConfigError, DragEvent, DragState, DragTracker, Draggable, GestureConfig, OffsetReset,
    Transition, Vec2,
};

fn threshold_classifier(loc: Vec2) -> DragState {
    if loc.x > 100.0 {
        DragState::Accepted
    } else {
        DragState::Rejected
    }
}

#[test]
fn test_accept_scenario() {
    let resolver_calls = Rc::new(Cell::new(0));
    let calls = Rc::clone(&resolver_calls);
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(move |_| {
            calls.set(calls.get() + 1);
            true
        })
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());

    tracker.on_move(Vec2::new(50.0, 50.0));
    assert_eq!(tracker.state(), DragState::Rejected);
    assert_eq!(tracker.offset(), Vec2::new(50.0, 50.0));

    tracker.on_move(Vec2::new(150.0, 50.0));
    assert_eq!(tracker.state(), DragState::Accepted);
    assert_eq!(tracker.offset(), Vec2::new(150.0, 50.0));

    let drop = tracker.on_release(Vec2::new(150.0, 50.0)).unwrap();
    assert!(drop.accepted);
    assert_eq!(drop.offset_reset, OffsetReset::Immediate);
    assert_eq!(tracker.state(), DragState::None);
    assert_eq!(tracker.offset(), Vec2::ZERO);
    assert_eq!(tracker.last_drop(), Some(drop));
    assert_eq!(resolver_calls.get(), 1);
}

#[test]
fn test_rejected_drop_springs_back() {
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(|_| false)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(30.0, 10.0));

    let drop = tracker.on_release(Vec2::new(30.0, 10.0)).unwrap();
    assert!(!drop.accepted);
    assert_eq!(drop.offset_reset, OffsetReset::SpringBack);
    assert_eq!(tracker.state(), DragState::None);
    assert_eq!(tracker.offset(), Vec2::ZERO);
}

#[test]
fn test_state_tracks_latest_classification() {
    let sequence = [
        DragState::Unknown,
        DragState::Accepted,
        DragState::Rejected,
        DragState::Accepted,
    ];
    let index = Rc::new(Cell::new(0));
    let next = Rc::clone(&index);
    let mut tracker = DragTracker::builder()
        .classify(move |_| {
            let state = sequence[next.get()];
            next.set(next.get() + 1);
            state
        })
        .resolve(|_| true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::new(10.0, 10.0), Instant::now());
    for (i, expected) in sequence.iter().enumerate() {
        let location = Vec2::new(10.0 + i as f32 * 5.0, 10.0 - i as f32);
        tracker.on_move(location);
        assert_eq!(tracker.state(), *expected);
        assert_eq!(tracker.offset(), location - Vec2::new(10.0, 10.0));
    }
}

#[test]
fn test_gated_move_is_unavailable() {
    let classified = Rc::new(Cell::new(false));
    let flag = Rc::clone(&classified);
    let mut tracker = DragTracker::builder()
        .classify(move |_| {
            flag.set(true);
            DragState::Accepted
        })
        .resolve(|_| true)
        .long_press_gated(true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(40.0, 40.0));

    assert_eq!(tracker.state(), DragState::Unavailable);
    assert_eq!(tracker.offset(), Vec2::ZERO);
    assert!(!classified.get());
}

#[test]
fn test_unavailable_is_sticky_until_release() {
    let resolved = Rc::new(Cell::new(false));
    let flag = Rc::clone(&resolved);
    let mut tracker = DragTracker::builder()
        .classify(|_| DragState::Accepted)
        .resolve(move |_| {
            flag.set(true);
            true
        })
        .long_press_gated(true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(5.0, 0.0));
    // A long press arriving after the drag went unavailable does not rescue it.
    assert!(!tracker.on_long_press());
    tracker.on_move(Vec2::new(50.0, 0.0));
    assert_eq!(tracker.state(), DragState::Unavailable);

    assert!(tracker.on_release(Vec2::new(50.0, 0.0)).is_none());
    assert_eq!(tracker.state(), DragState::None);
    assert!(!resolved.get());
    assert!(!tracker.is_active());
}

#[test]
fn test_long_press_arms_drag() {
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(|loc| loc.x > 100.0)
        .long_press_gated(true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    assert!(tracker.on_long_press());
    assert_eq!(tracker.state(), DragState::Unknown);
    assert!(tracker.is_dragging());

    tracker.on_move(Vec2::new(120.0, 0.0));
    assert_eq!(tracker.state(), DragState::Accepted);
    assert_eq!(tracker.offset(), Vec2::new(120.0, 0.0));

    let drop = tracker.on_release(Vec2::new(120.0, 0.0)).unwrap();
    assert!(drop.accepted);
    assert!(!tracker.is_dragging());
}

#[test]
fn test_tick_completes_long_press_after_delay() {
    let config = GestureConfig::builder()
        .long_press_delay(Duration::from_millis(500))
        .build()
        .unwrap();
    let mut tracker = DragTracker::builder()
        .passive()
        .long_press_gated(true)
        .config(config)
        .build()
        .unwrap();

    let pressed_at = Instant::now();
    tracker.on_press_start(Vec2::ZERO, pressed_at);

    assert!(!tracker.tick(pressed_at + Duration::from_millis(499)));
    assert_eq!(tracker.state(), DragState::None);

    assert!(tracker.tick(pressed_at + Duration::from_millis(500)));
    assert_eq!(tracker.state(), DragState::Unknown);

    // Only the first completion counts.
    assert!(!tracker.tick(pressed_at + Duration::from_secs(2)));
}

#[test]
fn test_long_press_ignored_without_gating() {
    let mut tracker = DragTracker::builder().passive().build().unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    assert!(!tracker.on_long_press());
    assert_eq!(tracker.state(), DragState::None);
}

#[test]
fn test_auxiliary_release_keeps_offset() {
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(|_| true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(150.0, 20.0));

    tracker.on_auxiliary_release();

    assert_eq!(tracker.state(), DragState::None);
    assert_eq!(tracker.offset(), Vec2::new(150.0, 20.0));
    assert!(!tracker.is_dragging());

    // The primary release still resolves the drop afterwards.
    let drop = tracker.on_release(Vec2::new(150.0, 20.0)).unwrap();
    assert!(drop.accepted);
    assert_eq!(tracker.offset(), Vec2::ZERO);
}

#[test]
fn test_auxiliary_release_clears_unavailable() {
    let mut tracker = DragTracker::builder()
        .passive()
        .long_press_gated(true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(1.0, 1.0));
    assert_eq!(tracker.state(), DragState::Unavailable);

    tracker.on_auxiliary_release();
    assert_eq!(tracker.state(), DragState::None);
}

#[test]
fn test_observer_receives_events() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let config = GestureConfig::shared();
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(|_| false)
        .config(Arc::clone(&config))
        .observer(move |event| sink.borrow_mut().push(*event))
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(150.0, 0.0));
    let drop = tracker.on_release(Vec2::new(150.0, 0.0)).unwrap();

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![
            DragEvent::OffsetChanged(Vec2::new(150.0, 0.0)),
            DragEvent::StateChanged {
                from: DragState::None,
                to: DragState::Accepted,
                transition: Transition::Linear(config.state_change_transition),
            },
            DragEvent::StateChanged {
                from: DragState::Accepted,
                to: DragState::None,
                transition: Transition::Linear(config.state_end_transition),
            },
            DragEvent::OffsetReset(OffsetReset::SpringBack),
            DragEvent::Dropped(drop),
        ]
    );
}

#[derive(Debug, PartialEq)]
struct Card {
    suit: &'static str,
}

impl Draggable for Card {}

#[test]
fn test_payload_callbacks() {
    let mut tracker = DragTracker::builder()
        .payload(Card { suit: "hearts" })
        .classify_payload(|payload, loc| match payload.downcast_ref::<Card>() {
            Some(card) if card.suit == "hearts" && loc.y < 50.0 => DragState::Accepted,
            Some(_) => DragState::Rejected,
            None => DragState::Unknown,
        })
        .resolve_payload(|payload, loc| payload.is::<Card>() && loc.y < 50.0)
        .build()
        .unwrap();

    assert_eq!(
        tracker.payload().and_then(|p| p.downcast_ref::<Card>()),
        Some(&Card { suit: "hearts" })
    );

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(0.0, 20.0));
    assert_eq!(tracker.state(), DragState::Accepted);
    tracker.on_move(Vec2::new(0.0, 80.0));
    assert_eq!(tracker.state(), DragState::Rejected);

    let drop = tracker.on_release(Vec2::new(0.0, 80.0)).unwrap();
    assert!(!drop.accepted);
}

#[test]
fn test_mixed_callback_forms() {
    let mut tracker = DragTracker::builder()
        .payload(String::from("token"))
        .classify(|_| DragState::Unknown)
        .resolve_payload(|payload, _| payload.downcast_ref::<String>().is_some())
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(3.0, 4.0));
    assert_eq!(tracker.state(), DragState::Unknown);
    assert!(tracker.on_release(Vec2::new(3.0, 4.0)).unwrap().accepted);
}

#[test]
fn test_payload_classifier_requires_payload() {
    let err = DragTracker::builder()
        .classify_payload(|_, _| DragState::Unknown)
        .resolve(|_| true)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ConfigError::MissingPayload {
            callback: "classifier"
        }
    );
}

#[test]
fn test_invalid_config_rejected() {
    let config = GestureConfig {
        long_press_delay: Duration::ZERO,
        ..GestureConfig::default()
    };
    let err = DragTracker::builder()
        .passive()
        .config(Arc::new(config))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ConfigError::InvalidTiming {
            name: "long_press_delay"
        }
    );
}

#[test]
fn test_tracker_reusable_across_gestures() {
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(|_| true)
        .build()
        .unwrap();

    for start in [Vec2::ZERO, Vec2::new(100.0, 100.0)] {
        tracker.on_press_start(start, Instant::now());
        tracker.on_move(start + Vec2::new(10.0, 0.0));
        assert_eq!(tracker.offset(), Vec2::new(10.0, 0.0));
        assert!(tracker.on_release(start + Vec2::new(10.0, 0.0)).is_some());
        assert_eq!(tracker.state(), DragState::None);
    }
}

fn unavailable_past_x40() -> DragTracker {
    DragTracker::builder()
        .classify(|loc| {
            if loc.x > 40.0 {
                DragState::Unavailable
            } else {
                DragState::Unknown
            }
        })
        .resolve(|_| true)
        .build()
        .unwrap()
}

#[test]
fn test_unavailable_release_zeroes_offset() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut tracker = DragTracker::builder()
        .classify(|loc| {
            if loc.x > 40.0 {
                DragState::Unavailable
            } else {
                DragState::Unknown
            }
        })
        .resolve(|_| true)
        .observer(move |event| sink.borrow_mut().push(*event))
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(50.0, 0.0));
    assert_eq!(tracker.state(), DragState::Unavailable);
    assert_eq!(tracker.offset(), Vec2::new(50.0, 0.0));

    assert!(tracker.on_release(Vec2::new(50.0, 0.0)).is_none());
    assert_eq!(tracker.state(), DragState::None);
    assert_eq!(tracker.offset(), Vec2::ZERO);
    assert!(!tracker.is_active());
    assert_eq!(
        events.borrow().last(),
        Some(&DragEvent::OffsetReset(OffsetReset::Immediate))
    );

    tracker.on_press_start(Vec2::new(10.0, 10.0), Instant::now());
    assert_eq!(tracker.offset(), Vec2::ZERO);
}

#[test]
fn test_unavailable_keeps_last_offset_until_release() {
    let mut tracker = unavailable_past_x40();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    tracker.on_move(Vec2::new(20.0, 5.0));
    assert_eq!(tracker.offset(), Vec2::new(20.0, 5.0));

    tracker.on_move(Vec2::new(45.0, 5.0));
    assert_eq!(tracker.state(), DragState::Unavailable);
    let frozen = tracker.offset();

    // Later samples are ignored while unavailable.
    tracker.on_move(Vec2::new(10.0, 0.0));
    tracker.on_move(Vec2::new(90.0, 30.0));
    assert_eq!(tracker.state(), DragState::Unavailable);
    assert_eq!(tracker.offset(), frozen);

    assert!(tracker.on_release(Vec2::new(90.0, 30.0)).is_none());
    assert_eq!(tracker.offset(), Vec2::ZERO);
}

#[test]
fn test_gated_offset_frozen_after_auxiliary_reset() {
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(|_| true)
        .long_press_gated(true)
        .build()
        .unwrap();
    assert!(tracker.is_long_press_gated());

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    assert!(tracker.on_long_press());
    tracker.on_move(Vec2::new(30.0, 10.0));
    assert_eq!(tracker.offset(), Vec2::new(30.0, 10.0));

    tracker.on_auxiliary_release();
    tracker.on_move(Vec2::new(80.0, 10.0));
    assert_eq!(tracker.state(), DragState::Unavailable);
    assert_eq!(tracker.offset(), Vec2::new(30.0, 10.0));

    assert!(tracker.on_release(Vec2::new(80.0, 10.0)).is_none());
    assert_eq!(tracker.state(), DragState::None);
    assert_eq!(tracker.offset(), Vec2::ZERO);
}

#[test]
fn test_long_press_armed_release_resolves() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(move |_| {
            counter.set(counter.get() + 1);
            false
        })
        .long_press_gated(true)
        .build()
        .unwrap();

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    assert!(tracker.on_long_press());
    assert_eq!(tracker.state(), DragState::Unknown);

    let drop = tracker.on_release(Vec2::ZERO).unwrap();
    assert!(!drop.accepted);
    assert_eq!(drop.offset_reset, OffsetReset::SpringBack);
    assert_eq!(calls.get(), 1);
    assert_eq!(tracker.state(), DragState::None);
    assert!(!tracker.is_dragging());
}

#[test]
fn test_bare_tap_does_not_resolve() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut tracker = DragTracker::builder()
        .classify(threshold_classifier)
        .resolve(move |_| {
            counter.set(counter.get() + 1);
            true
        })
        .build()
        .unwrap();
    assert!(!tracker.is_long_press_gated());

    tracker.on_press_start(Vec2::ZERO, Instant::now());
    assert!(tracker.on_release(Vec2::ZERO).is_none());
    assert_eq!(calls.get(), 0);
}
