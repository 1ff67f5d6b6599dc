use core::fmt;

use kurbo::{Point, Vec2};

use crate::dimension_map::DimensionMap;
use crate::draggable::DraggableDimension;
use crate::types::{Critical, DraggableId, DropReason, DroppableId, MoveDirection, MovementMode};
use crate::viewport::Viewport;

/// Dimensions collected for the start of a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialPublish {
    pub critical: Critical,
    pub dimensions: DimensionMap,
    pub viewport: Viewport,
    /// Whether auto-scroll may move the window. Forced off when any list is fixed on the page.
    pub is_window_scroll_allowed: bool,
}

/// New scroll of a droppable that changed while dimensions were collected.
#[derive(Clone, Debug, PartialEq)]
pub struct DroppableScroll {
    pub droppable_id: DroppableId,
    pub scroll: Vec2,
}

/// Dimension changes collected while a drag was live.
///
/// Additions carry client boxes measured at collection time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Published {
    pub additions: Vec<DraggableDimension>,
    pub removals: Vec<DraggableId>,
    pub modified: Vec<DroppableScroll>,
}

/// An event fed to [`crate::transition`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Lift {
        draggable_id: DraggableId,
        client_selection: Point,
        movement_mode: MovementMode,
    },
    InitialPublish(InitialPublish),
    CollectionStarting,
    PublishWhileDragging(Published),
    Move {
        client: Point,
    },
    MoveByWindowScroll {
        new_scroll: Vec2,
    },
    UpdateViewportMaxScroll {
        max_scroll: Vec2,
    },
    UpdateDroppableScroll {
        id: DroppableId,
        new_scroll: Vec2,
    },
    UpdateDroppableIsEnabled {
        id: DroppableId,
        is_enabled: bool,
    },
    UpdateDroppableIsCombineEnabled {
        id: DroppableId,
        is_combine_enabled: bool,
    },
    MoveInDirection(MoveDirection),
    Drop {
        reason: DropReason,
    },
    DropAnimationFinished,
    /// Completes a running drop animation right away, e.g. before a new lift.
    DropComplete,
    Flush,
}

/// Payload-free tag of an [`Action`], for errors and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Lift,
    InitialPublish,
    CollectionStarting,
    PublishWhileDragging,
    Move,
    MoveByWindowScroll,
    UpdateViewportMaxScroll,
    UpdateDroppableScroll,
    UpdateDroppableIsEnabled,
    UpdateDroppableIsCombineEnabled,
    MoveInDirection,
    Drop,
    DropAnimationFinished,
    DropComplete,
    Flush,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lift => "lift",
            Self::InitialPublish => "initial publish",
            Self::CollectionStarting => "collection starting",
            Self::PublishWhileDragging => "publish while dragging",
            Self::Move => "move",
            Self::MoveByWindowScroll => "move by window scroll",
            Self::UpdateViewportMaxScroll => "update viewport max scroll",
            Self::UpdateDroppableScroll => "update droppable scroll",
            Self::UpdateDroppableIsEnabled => "update droppable is enabled",
            Self::UpdateDroppableIsCombineEnabled => "update droppable is combine enabled",
            Self::MoveInDirection => "move in direction",
            Self::Drop => "drop",
            Self::DropAnimationFinished => "drop animation finished",
            Self::DropComplete => "drop complete",
            Self::Flush => "flush",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Lift { .. } => ActionKind::Lift,
            Self::InitialPublish(_) => ActionKind::InitialPublish,
            Self::CollectionStarting => ActionKind::CollectionStarting,
            Self::PublishWhileDragging(_) => ActionKind::PublishWhileDragging,
            Self::Move { .. } => ActionKind::Move,
            Self::MoveByWindowScroll { .. } => ActionKind::MoveByWindowScroll,
            Self::UpdateViewportMaxScroll { .. } => ActionKind::UpdateViewportMaxScroll,
            Self::UpdateDroppableScroll { .. } => ActionKind::UpdateDroppableScroll,
            Self::UpdateDroppableIsEnabled { .. } => ActionKind::UpdateDroppableIsEnabled,
            Self::UpdateDroppableIsCombineEnabled { .. } => {
                ActionKind::UpdateDroppableIsCombineEnabled
            }
            Self::MoveInDirection(_) => ActionKind::MoveInDirection,
            Self::Drop { .. } => ActionKind::Drop,
            Self::DropAnimationFinished => ActionKind::DropAnimationFinished,
            Self::DropComplete => ActionKind::DropComplete,
            Self::Flush => ActionKind::Flush,
        }
    }

    /// Events that move the item or change the geometry it is resolved against.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Self::Move { .. }
                | Self::MoveByWindowScroll { .. }
                | Self::UpdateViewportMaxScroll { .. }
                | Self::UpdateDroppableScroll { .. }
                | Self::UpdateDroppableIsEnabled { .. }
                | Self::UpdateDroppableIsCombineEnabled { .. }
                | Self::MoveInDirection(_)
        )
    }

    /// Events after which no auto-scroll may run.
    pub fn stops_auto_scroll(&self) -> bool {
        matches!(
            self,
            Self::Drop { .. }
                | Self::DropAnimationFinished
                | Self::DropComplete
                | Self::Flush
                | Self::CollectionStarting
        )
    }
}
