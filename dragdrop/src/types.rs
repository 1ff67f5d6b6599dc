use core::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.into())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable identity of a draggable item.
    DraggableId
);
string_id!(
    /// Stable identity of a droppable list.
    DroppableId
);
string_id!(
    /// Group tag: a draggable can only be dropped into droppables of the same type.
    ItemType
);

impl Default for ItemType {
    fn default() -> Self {
        Self::new("DEFAULT")
    }
}

/// How the current drag is being driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementMode {
    /// Pointer drags: the item follows the pointer and auto-scroll is continuous.
    Fluid,
    /// Keyboard drags: the item snaps between slots and auto-scroll jumps.
    Snap,
}

impl MovementMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fluid => "fluid",
            Self::Snap => "snap",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropReason {
    Drop,
    Cancel,
}

impl DropReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Cancel => "cancel",
        }
    }
}

/// Whether a droppable keeps a placeholder for the lifted item in its home slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DroppableMode {
    /// The home slot stays reserved while the item is lifted.
    #[default]
    Standard,
    /// The list re-renders without the lifted item; siblings after it collapse backwards.
    Virtual,
}

/// A keyboard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Down and right move towards the end of an axis.
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DraggableDescriptor {
    pub id: DraggableId,
    pub index: usize,
    pub droppable_id: DroppableId,
    pub item_type: ItemType,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppableDescriptor {
    pub id: DroppableId,
    pub item_type: ItemType,
    pub mode: DroppableMode,
}

/// The grabbed item and the list it was lifted from.
///
/// Fixed for the lifetime of one drag, even when list mutation changes the item's index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Critical {
    pub draggable: DraggableDescriptor,
    pub droppable: DroppableDescriptor,
}

impl Critical {
    pub fn source(&self) -> DraggableLocation {
        DraggableLocation {
            droppable_id: self.droppable.id.clone(),
            index: self.draggable.index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DraggableLocation {
    pub droppable_id: DroppableId,
    pub index: usize,
}

/// Merge target: the dragged item would be combined with `draggable_id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combine {
    pub draggable_id: DraggableId,
    pub droppable_id: DroppableId,
}

/// Payload for before-drag-start and drag-start notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragStart {
    pub draggable_id: DraggableId,
    pub item_type: ItemType,
    pub source: DraggableLocation,
    pub mode: MovementMode,
}

impl DragStart {
    pub fn from_critical(critical: &Critical, mode: MovementMode) -> Self {
        Self {
            draggable_id: critical.draggable.id.clone(),
            item_type: critical.draggable.item_type.clone(),
            source: critical.source(),
            mode,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragUpdate {
    pub draggable_id: DraggableId,
    pub item_type: ItemType,
    pub source: DraggableLocation,
    pub mode: MovementMode,
    pub destination: Option<DraggableLocation>,
    pub combine: Option<Combine>,
}

impl DragUpdate {
    pub fn new(
        start: DragStart,
        destination: Option<DraggableLocation>,
        combine: Option<Combine>,
    ) -> Self {
        Self {
            draggable_id: start.draggable_id,
            item_type: start.item_type,
            source: start.source,
            mode: start.mode,
            destination,
            combine,
        }
    }
}

/// What the host should do with its data once a drag ends.
///
/// `destination` and `combine` are both `None` when the drag was cancelled or released
/// outside any valid target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropResult {
    pub draggable_id: DraggableId,
    pub item_type: ItemType,
    pub source: DraggableLocation,
    pub mode: MovementMode,
    pub destination: Option<DraggableLocation>,
    pub combine: Option<Combine>,
    pub reason: DropReason,
}

impl DropResult {
    pub fn new(update: DragUpdate, reason: DropReason) -> Self {
        Self {
            draggable_id: update.draggable_id,
            item_type: update.item_type,
            source: update.source,
            mode: update.mode,
            destination: update.destination,
            combine: update.combine,
            reason,
        }
    }

    /// A cancellation result: nothing moved.
    pub fn cancelled(critical: &Critical, mode: MovementMode) -> Self {
        Self::new(
            DragUpdate::new(DragStart::from_critical(critical, mode), None, None),
            DropReason::Cancel,
        )
    }
}
