//! Classifier and resolver callbacks.
//!
//! Each tracker registers exactly one form of each callback: either a plain form
//! that only sees the pointer location, or a payload form that also sees the
//! tracker's [`Draggable`] payload.

use std::fmt;

use grapple_core::math::Vec2;

use crate::payload::Draggable;
use crate::state::DragState;

type PlainClassify = Box<dyn FnMut(Vec2) -> DragState>;
type PayloadClassify = Box<dyn FnMut(&dyn Draggable, Vec2) -> DragState>;
type PlainResolve = Box<dyn FnMut(Vec2) -> bool>;
type PayloadResolve = Box<dyn FnMut(&dyn Draggable, Vec2) -> bool>;

/// Maps the current pointer location to a [`DragState`].
pub enum Classifier {
    Plain(PlainClassify),
    WithPayload(PayloadClassify),
}

impl Classifier {
    pub fn plain(f: impl FnMut(Vec2) -> DragState + 'static) -> Self {
        Classifier::Plain(Box::new(f))
    }

    pub fn with_payload(f: impl FnMut(&dyn Draggable, Vec2) -> DragState + 'static) -> Self {
        Classifier::WithPayload(Box::new(f))
    }

    /// Classifier used by passive draggables: every sample is `Unknown`.
    pub fn passive() -> Self {
        Classifier::plain(|_| DragState::Unknown)
    }

    pub fn needs_payload(&self) -> bool {
        matches!(self, Classifier::WithPayload(_))
    }

    /// Run the registered form. A payload form with no payload falls back to
    /// `Unknown`; builders reject that combination before it can happen.
    pub(crate) fn classify(
        &mut self,
        payload: Option<&dyn Draggable>,
        location: Vec2,
    ) -> DragState {
        match (self, payload) {
            (Classifier::Plain(f), _) => f(location),
            (Classifier::WithPayload(f), Some(payload)) => f(payload, location),
            (Classifier::WithPayload(_), None) => DragState::Unknown,
        }
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classifier::Plain(_) => f.write_str("Classifier::Plain"),
            Classifier::WithPayload(_) => f.write_str("Classifier::WithPayload"),
        }
    }
}

/// Decides whether a drop at the release location is accepted.
pub enum Resolver {
    Plain(PlainResolve),
    WithPayload(PayloadResolve),
}

impl Resolver {
    pub fn plain(f: impl FnMut(Vec2) -> bool + 'static) -> Self {
        Resolver::Plain(Box::new(f))
    }

    pub fn with_payload(f: impl FnMut(&dyn Draggable, Vec2) -> bool + 'static) -> Self {
        Resolver::WithPayload(Box::new(f))
    }

    /// Resolver used by passive draggables: every drop is rejected.
    pub fn passive() -> Self {
        Resolver::plain(|_| false)
    }

    pub fn needs_payload(&self) -> bool {
        matches!(self, Resolver::WithPayload(_))
    }

    pub(crate) fn resolve(&mut self, payload: Option<&dyn Draggable>, location: Vec2) -> bool {
        match (self, payload) {
            (Resolver::Plain(f), _) => f(location),
            (Resolver::WithPayload(f), Some(payload)) => f(payload, location),
            (Resolver::WithPayload(_), None) => false,
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolver::Plain(_) => f.write_str("Resolver::Plain"),
            Resolver::WithPayload(_) => f.write_str("Resolver::WithPayload"),
        }
    }
}
