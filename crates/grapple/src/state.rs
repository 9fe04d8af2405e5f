//! Shared drag state types and the notifications a tracker emits.

use std::time::Duration;

use grapple_core::math::Vec2;

/// Classification of the current drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    /// No active interaction.
    #[default]
    None,
    /// Drag active, outcome undetermined.
    Unknown,
    /// A valid drop target is under the pointer.
    Accepted,
    /// The pointer is over an invalid target or no target at all.
    Rejected,
    /// Dragging is disallowed for this gesture. Sticky until the gesture ends.
    Unavailable,
}

impl DragState {
    /// Check if this state belongs to a drag that is currently honoring movement.
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            DragState::Unknown | DragState::Accepted | DragState::Rejected
        )
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DragState::Unavailable)
    }
}

/// How the presentation layer should bring the offset back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetReset {
    /// Snap to rest without animating. Used after an accepted drop, where the
    /// dragged content is expected to relocate to its target.
    Immediate,
    /// Animate back to the origin. Used after a rejected drop.
    SpringBack,
}

impl OffsetReset {
    pub fn for_outcome(accepted: bool) -> Self {
        if accepted {
            OffsetReset::Immediate
        } else {
            OffsetReset::SpringBack
        }
    }
}

/// Animation hint attached to a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Immediate,
    Linear(Duration),
}

/// Result of resolving a drop at the end of a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropResult {
    /// Whether the resolver accepted the drop.
    pub accepted: bool,
    /// Pointer location at release.
    pub location: Vec2,
    /// How the offset was returned to zero.
    pub offset_reset: OffsetReset,
}

/// Notification emitted by a tracker whenever something a presentation layer
/// would redraw has changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    StateChanged {
        from: DragState,
        to: DragState,
        transition: Transition,
    },
    OffsetChanged(Vec2),
    OffsetReset(OffsetReset),
    Dropped(DropResult),
}
