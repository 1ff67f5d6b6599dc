use core::cmp::Ordering;

use kurbo::Rect;

use crate::dimension_map::DimensionMap;
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::geometry::{Axis, rect_union};
use crate::impact::{AfterCritical, DisplacedBy, Displacement, Movement};
use crate::types::DraggableId;
use crate::viewport::Viewport;
use crate::visibility::is_partially_visible;

/// Siblings pushed aside by moving the dragged item from slot `from` to slot `to`.
#[derive(Debug, PartialEq)]
pub struct Displaced<'a, T> {
    pub shifted: &'a [T],
    /// Index of `shifted[0]` within the sibling list.
    pub first_index: usize,
    /// Signed main-axis shift applied to every item in `shifted`; zero when nothing moves.
    pub offset: f64,
}

/// Which of `siblings` shift, and by how much, when the dragged item travels from slot
/// `from` to slot `to`.
///
/// Slots index the gaps of `siblings` (the list without the dragged item), so both bounds
/// are clamped to `0..=siblings.len()`. Moving forward pulls `[from, to)` back by `size`;
/// moving backward pushes `[to, from)` forward. A foreign list passes `from = len`.
pub fn displace<T>(siblings: &[T], from: usize, to: usize, size: f64) -> Displaced<'_, T> {
    let len = siblings.len();
    let from = from.min(len);
    let to = to.min(len);
    match to.cmp(&from) {
        Ordering::Greater => Displaced {
            shifted: &siblings[from..to],
            first_index: from,
            offset: -size,
        },
        Ordering::Less => Displaced {
            shifted: &siblings[to..from],
            first_index: to,
            offset: size,
        },
        Ordering::Equal => Displaced {
            shifted: &[],
            first_index: to,
            offset: 0.0,
        },
    }
}

/// A sibling the dragged item can be placed around.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate<'a> {
    pub dimension: &'a DraggableDimension,
    /// Page border box after any lift-time collapse, before displacement.
    pub border_box: Rect,
    pub margin_box: Rect,
}

impl Candidate<'_> {
    pub fn id(&self) -> &DraggableId {
        self.dimension.id()
    }
}

/// The ordered siblings of a destination list, without the dragged item.
pub(crate) struct Candidates<'a> {
    pub items: Vec<Candidate<'a>>,
    /// Slot the dragged item occupies before moving: its own index in a standard home
    /// list, otherwise the end of the list.
    pub from: usize,
}

impl<'a> Candidates<'a> {
    pub fn new(
        draggable: &DraggableDimension,
        destination: &DroppableDimension,
        dimensions: &'a DimensionMap,
        after_critical: &AfterCritical,
    ) -> Self {
        let items: Vec<Candidate<'a>> = dimensions
            .inside(destination.id())
            .into_iter()
            .filter(|d| d.id() != draggable.id())
            .map(|d| {
                let shift = after_critical.baseline_shift(d.id());
                Candidate {
                    dimension: d,
                    border_box: d.page.border_box + shift,
                    margin_box: d.page.margin_box + shift,
                }
            })
            .collect();
        let is_home = draggable.droppable_id() == destination.id();
        let from = if is_home && !destination.is_virtual() {
            items
                .iter()
                .take_while(|c| c.dimension.index() < draggable.index())
                .count()
        } else {
            items.len()
        };
        Self { items, from }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn position(&self, id: &DraggableId) -> Option<usize> {
        self.items.iter().position(|c| c.id() == id)
    }

    pub fn border_box(&self, index: usize, movement: Option<&Movement>) -> Option<Rect> {
        let c = self.items.get(index)?;
        Some(c.border_box + movement.map_or(kurbo::Vec2::ZERO, |m| m.offset_of(c.id())))
    }

    pub fn margin_box(&self, index: usize, movement: Option<&Movement>) -> Option<Rect> {
        let c = self.items.get(index)?;
        Some(c.margin_box + movement.map_or(kurbo::Vec2::ZERO, |m| m.offset_of(c.id())))
    }

    /// The displacement caused by placing the dragged item in slot `to`.
    pub fn movement_to(
        &self,
        to: usize,
        size: f64,
        context: &MovementContext<'_>,
    ) -> Movement {
        let displaced = displace(&self.items, self.from, to, size);
        build_movement(&displaced, size, context)
    }
}

/// Inputs shared by every visibility and animation decision for one impact.
pub(crate) struct MovementContext<'a> {
    pub axis: Axis,
    pub destination: &'a DroppableDimension,
    pub viewport: &'a Viewport,
    /// Movement of the previous impact in the same destination.
    pub previous: Option<&'a Movement>,
    pub force_should_animate: Option<bool>,
}

fn build_movement(
    displaced: &Displaced<'_, Candidate<'_>>,
    size: f64,
    context: &MovementContext<'_>,
) -> Movement {
    let value = if displaced.shifted.is_empty() {
        size
    } else {
        displaced.offset
    };
    let displaced_by = DisplacedBy::new(context.axis, value);
    let displaced = displaced
        .shifted
        .iter()
        .map(|c| displacement_for(c.id(), c.margin_box, displaced_by, context))
        .collect();
    Movement {
        displaced,
        displaced_by,
    }
}

fn displacement_for(
    id: &DraggableId,
    margin_box: Rect,
    displaced_by: DisplacedBy,
    context: &MovementContext<'_>,
) -> Displacement {
    let target = rect_union(margin_box, margin_box + displaced_by.point);
    let is_visible = is_partially_visible(target, context.destination, context.viewport);
    let should_animate = if !is_visible {
        false
    } else if let Some(force) = context.force_should_animate {
        force
    } else {
        match context.previous {
            Some(previous) if same_direction(previous.displaced_by, displaced_by) => previous
                .get(id)
                .map_or(true, |last| last.is_visible && last.should_animate),
            _ => true,
        }
    };
    Displacement {
        draggable_id: id.clone(),
        is_visible,
        should_animate,
    }
}

fn same_direction(a: DisplacedBy, b: DisplacedBy) -> bool {
    (a.value >= 0.0) == (b.value >= 0.0)
}

/// Re-evaluates visibility of an existing movement, e.g. after a scroll.
///
/// Displaced ids that are no longer in `dimensions` are dropped.
pub(crate) fn recompute_movement(
    movement: &Movement,
    destination: &DroppableDimension,
    dimensions: &DimensionMap,
    after_critical: &AfterCritical,
    viewport: &Viewport,
    force_should_animate: Option<bool>,
) -> Movement {
    let context = MovementContext {
        axis: destination.axis,
        destination,
        viewport,
        previous: Some(movement),
        force_should_animate,
    };
    let displaced = movement
        .displaced
        .iter()
        .filter_map(|d| {
            let Some(dimension) = dimensions.draggable(&d.draggable_id) else {
                dwarn!(draggable_id = %d.draggable_id, "displaced draggable vanished; skipping");
                return None;
            };
            let shift = after_critical.baseline_shift(dimension.id());
            let margin_box = dimension.page.margin_box + shift;
            Some(displacement_for(dimension.id(), margin_box, movement.displaced_by, &context))
        })
        .collect();
    Movement {
        displaced,
        displaced_by: movement.displaced_by,
    }
}
