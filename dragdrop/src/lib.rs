//! A headless drag-and-drop engine for reorderable lists.
//!
//! For a driver that owns the live drag, schedules work and notifies listeners, see the
//! `dragdrop-adapter` crate.
//!
//! This crate holds the pure parts: the drag state machine ([`transition`]), impact
//! resolution (which list and slot the dragged item would land in, or which item it would
//! combine with), sibling displacement, keyboard movement, drop resolution and auto-scroll
//! planning. Nothing here performs I/O or reads a clock; time-dependent functions take
//! `now_ms`.
//!
//! It is UI-agnostic. A view layer is expected to provide:
//! - measured boxes for every draggable and droppable when a drag starts
//! - window and container scroll offsets
//! - pointer or keyboard input, translated into [`Action`]s
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod auto_scroll;

mod action;
mod dimension_map;
mod displacement;
mod draggable;
mod drop;
mod droppable;
mod error;
mod geometry;
mod impact;
mod keyboard;
mod lift;
mod options;
mod position;
mod publish;
mod resolve;
mod state;
mod transition;
mod types;
mod viewport;
mod visibility;

#[cfg(test)]
mod tests;

pub use action::{Action, ActionKind, DroppableScroll, InitialPublish, Published};
pub use dimension_map::{DimensionMap, IndexIssue};
pub use displacement::{Displaced, displace};
pub use draggable::DraggableDimension;
pub use drop::{DropOutcome, drop_duration_ms, drop_impact, new_home_client_offset, resolve_drop};
pub use droppable::{DroppableDimension, Frame, Placeholder, ScrollContainer, Subject};
pub use error::TransitionError;
pub use geometry::{Axis, BoxModel};
pub use impact::{AfterCritical, DisplacedBy, Displacement, DragImpact, ImpactLocation, Movement};
pub use keyboard::{SnapMove, move_in_direction};
pub use lift::lift_effect;
pub use options::{AutoScrollOptions, DragOptions, DropAnimationOptions, DurationDampening};
pub use position::{
    DragPositions, ItemPositions, client_from_page_center, go_after, go_before, go_into_start,
    page_border_box_center,
};
pub use publish::{check_indices, publish_while_dragging};
pub use resolve::{ResolveInput, droppable_over, get_drag_impact, resolve};
pub use state::{
    CompletedDrag, DragState, DraggingState, DropPendingState, IdleState, PendingDrop, Phase,
    PreparingState,
};
pub use transition::{transition, transition_with};
pub use types::{
    Combine, Critical, DragStart, DragUpdate, DraggableDescriptor, DraggableId,
    DraggableLocation, DropReason, DropResult, DroppableDescriptor, DroppableId, DroppableMode,
    ItemType, MoveDirection, MovementMode,
};
pub use viewport::{ScrollDetails, ScrollDiff, Viewport, max_scroll};
pub use visibility::{Visibility, is_partially_visible, is_visible};

pub use kurbo;
