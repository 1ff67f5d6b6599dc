use kurbo::Vec2;

use crate::geometry::Axis;
use crate::types::{Combine, DraggableId, DraggableLocation, DroppableId};

/// How far displaced siblings move, as a signed main-axis value.
///
/// Positive values push siblings towards the end of the list. The sign is only meaningful
/// while something is displaced.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplacedBy {
    pub value: f64,
    pub point: Vec2,
}

impl DisplacedBy {
    pub fn new(axis: Axis, value: f64) -> Self {
        Self {
            value,
            point: axis.vec(value),
        }
    }

    /// The item's own size along `axis`, taken from its margin box.
    pub fn of_item(axis: Axis, displace_by: Vec2) -> Self {
        Self::new(axis, axis.of_vec(displace_by))
    }
}

/// One sibling that moved to make room for the dragged item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Displacement {
    pub draggable_id: DraggableId,
    pub is_visible: bool,
    /// `false` when the host should jump the item into place.
    pub should_animate: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    /// Displaced siblings in list order.
    pub displaced: Vec<Displacement>,
    pub displaced_by: DisplacedBy,
}

impl Movement {
    pub fn empty(displaced_by: DisplacedBy) -> Self {
        Self {
            displaced: Vec::new(),
            displaced_by,
        }
    }

    pub fn get(&self, id: &DraggableId) -> Option<&Displacement> {
        self.displaced.iter().find(|d| &d.draggable_id == id)
    }

    pub fn is_displaced(&self, id: &DraggableId) -> bool {
        self.get(id).is_some()
    }

    /// Visual offset of `id` under this movement.
    pub fn offset_of(&self, id: &DraggableId) -> Vec2 {
        if self.is_displaced(id) {
            self.displaced_by.point
        } else {
            Vec2::ZERO
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &DraggableId> {
        self.displaced.iter().map(|d| &d.draggable_id)
    }
}

/// Where the dragged item would land.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpactLocation {
    Reorder(DraggableLocation),
    Combine(Combine),
}

impl ImpactLocation {
    pub fn droppable_id(&self) -> &DroppableId {
        match self {
            Self::Reorder(location) => &location.droppable_id,
            Self::Combine(combine) => &combine.droppable_id,
        }
    }
}

/// Everything a position of the dragged item implies for the rest of the lists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragImpact {
    pub movement: Movement,
    pub at: Option<ImpactLocation>,
}

impl DragImpact {
    /// Not over anything: no destination and nothing displaced.
    pub fn none(displaced_by: DisplacedBy) -> Self {
        Self {
            movement: Movement::empty(displaced_by),
            at: None,
        }
    }

    pub fn destination(&self) -> Option<&DraggableLocation> {
        match &self.at {
            Some(ImpactLocation::Reorder(location)) => Some(location),
            _ => None,
        }
    }

    pub fn combine(&self) -> Option<&Combine> {
        match &self.at {
            Some(ImpactLocation::Combine(combine)) => Some(combine),
            _ => None,
        }
    }

    pub fn dragged_over(&self) -> Option<&DroppableId> {
        self.at.as_ref().map(ImpactLocation::droppable_id)
    }
}

/// Home-list siblings that sat after the dragged item at lift.
///
/// Used to map indices back to the original order and, for virtual lists, to shift the
/// baseline of siblings that collapsed into the vacated slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AfterCritical {
    pub effected: Vec<DraggableId>,
    pub displaced_by: DisplacedBy,
    pub in_virtual_list: bool,
}

impl AfterCritical {
    pub fn contains(&self, id: &DraggableId) -> bool {
        self.effected.iter().any(|e| e == id)
    }

    /// How far `id` moved at lift, before any displacement.
    pub fn baseline_shift(&self, id: &DraggableId) -> Vec2 {
        if self.in_virtual_list && self.contains(id) {
            -self.displaced_by.point
        } else {
            Vec2::ZERO
        }
    }
}
