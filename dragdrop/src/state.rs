use core::fmt;

use kurbo::{Point, Vec2};

use crate::dimension_map::DimensionMap;
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::impact::{AfterCritical, DragImpact};
use crate::position::DragPositions;
use crate::types::{Critical, DraggableId, DropReason, DropResult, MovementMode};
use crate::viewport::Viewport;

/// The lifecycle phase of the single live drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Preparing,
    Dragging,
    Collecting,
    DropPending,
    DropAnimating,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Dragging => "dragging",
            Self::Collecting => "collecting",
            Self::DropPending => "drop pending",
            Self::DropAnimating => "drop animating",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdleState {
    /// The drag that just finished, if any.
    pub completed: Option<CompletedDrag>,
    /// `true` when the drag was torn down by a flush rather than finishing normally.
    pub should_flush: bool,
}

/// A lift was requested; waiting for the initial dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparingState {
    pub draggable_id: DraggableId,
    pub client_selection: Point,
    pub movement_mode: MovementMode,
}

/// Everything known about a live drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggingState {
    pub critical: Critical,
    pub movement_mode: MovementMode,
    pub dimensions: DimensionMap,
    pub initial: DragPositions,
    pub current: DragPositions,
    pub impact: DragImpact,
    pub on_lift_impact: DragImpact,
    pub after_critical: AfterCritical,
    pub viewport: Viewport,
    pub is_window_scroll_allowed: bool,
    /// Set by keyboard moves that land outside the visible area: how far to jump-scroll.
    pub scroll_jump_request: Option<Vec2>,
    pub force_should_animate: Option<bool>,
}

impl DraggingState {
    /// The dragged item's current dimension.
    ///
    /// Present for the whole drag: publishing never removes the critical draggable.
    pub fn draggable(&self) -> Option<&DraggableDimension> {
        self.dimensions.draggable(&self.critical.draggable.id)
    }

    pub fn home(&self) -> Option<&DroppableDimension> {
        self.dimensions.droppable(&self.critical.droppable.id)
    }

    /// The droppable the current impact is over.
    pub fn destination(&self) -> Option<&DroppableDimension> {
        self.impact
            .dragged_over()
            .and_then(|id| self.dimensions.droppable(id))
    }
}

/// A drop was requested while dimensions were still being collected.
#[derive(Clone, Debug, PartialEq)]
pub struct DropPendingState {
    pub drag: DraggingState,
    pub reason: DropReason,
    /// `false` once the collection finished; the drop can then be replayed.
    pub is_waiting: bool,
}

/// The outcome of a drag, handed to the host exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedDrag {
    pub critical: Critical,
    pub result: DropResult,
    pub impact: DragImpact,
    pub after_critical: AfterCritical,
}

/// A drop that is animating into its resting place.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingDrop {
    pub completed: CompletedDrag,
    pub new_home_client_offset: Vec2,
    pub drop_duration_ms: u64,
    pub dimensions: DimensionMap,
}

/// Canonical state of the drag engine: exactly one variant is live.
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    Idle(IdleState),
    Preparing(PreparingState),
    Dragging(DraggingState),
    Collecting(DraggingState),
    DropPending(DropPendingState),
    DropAnimating(PendingDrop),
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle(IdleState {
            completed: None,
            should_flush: false,
        })
    }
}

impl DragState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle(_) => Phase::Idle,
            Self::Preparing(_) => Phase::Preparing,
            Self::Dragging(_) => Phase::Dragging,
            Self::Collecting(_) => Phase::Collecting,
            Self::DropPending(_) => Phase::DropPending,
            Self::DropAnimating(_) => Phase::DropAnimating,
        }
    }

    /// The live drag data, in any phase that has it.
    pub fn dragging(&self) -> Option<&DraggingState> {
        match self {
            Self::Dragging(d) | Self::Collecting(d) => Some(d),
            Self::DropPending(pending) => Some(&pending.drag),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle(_))
    }

    /// The critical pair of the drag in progress or being dropped.
    pub fn critical(&self) -> Option<&Critical> {
        match self {
            Self::DropAnimating(pending) => Some(&pending.completed.critical),
            _ => self.dragging().map(|d| &d.critical),
        }
    }

    /// The completion handed over when the last drag ended.
    pub fn completed(&self) -> Option<&CompletedDrag> {
        match self {
            Self::Idle(idle) => idle.completed.as_ref(),
            _ => None,
        }
    }
}
