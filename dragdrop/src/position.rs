use kurbo::{Point, Rect, Vec2};

use crate::dimension_map::DimensionMap;
use crate::displacement::Candidates;
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::geometry::{Axis, BoxModel};
use crate::impact::{AfterCritical, DragImpact, ImpactLocation};
use crate::viewport::Viewport;

/// Pointer/selection and item center at one moment, in one coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPositions {
    pub selection: Point,
    pub border_box_center: Point,
    /// Travel since lift.
    pub offset: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragPositions {
    pub client: ItemPositions,
    pub page: ItemPositions,
}

impl DragPositions {
    /// Positions at lift: no travel yet.
    pub fn initial(
        client_selection: Point,
        draggable: &DraggableDimension,
        viewport: &Viewport,
    ) -> Self {
        let client = ItemPositions {
            selection: client_selection,
            border_box_center: draggable.client.border_box.center(),
            offset: Vec2::ZERO,
        };
        Self {
            client,
            page: ItemPositions {
                selection: client.selection + viewport.scroll.initial,
                border_box_center: client.border_box_center + viewport.scroll.initial,
                offset: Vec2::ZERO,
            },
        }
    }

    /// Positions after the pointer moved to `client_selection` and/or the window scrolled.
    pub fn current(initial: &Self, client_selection: Point, viewport: &Viewport) -> Self {
        let offset = client_selection - initial.client.selection;
        let client = ItemPositions {
            selection: client_selection,
            border_box_center: initial.client.border_box_center + offset,
            offset,
        };
        Self {
            client,
            page: ItemPositions {
                selection: client.selection + viewport.scroll.current,
                border_box_center: client.border_box_center + viewport.scroll.current,
                offset: client.offset + viewport.scroll.diff.value,
            },
        }
    }
}

fn from_start_to_center(axis: Axis, moving: &BoxModel) -> f64 {
    axis.margin_start(moving.margin) + axis.size(moving.border_box) / 2.0
}

fn from_end_to_center(axis: Axis, moving: &BoxModel) -> f64 {
    axis.margin_end(moving.margin) + axis.size(moving.border_box) / 2.0
}

fn cross_center(axis: Axis, target: Rect, moving: &BoxModel) -> f64 {
    let cross = axis.cross();
    cross.start(target) + cross.margin_start(moving.margin) + cross.size(moving.border_box) / 2.0
}

/// Center of `moving` when placed right after `relative_to` (a margin box).
pub fn go_after(axis: Axis, relative_to: Rect, moving: &BoxModel) -> Point {
    axis.point(
        axis.end(relative_to) + from_start_to_center(axis, moving),
        cross_center(axis, relative_to, moving),
    )
}

/// Center of `moving` when placed right before `relative_to` (a margin box).
pub fn go_before(axis: Axis, relative_to: Rect, moving: &BoxModel) -> Point {
    axis.point(
        axis.start(relative_to) - from_end_to_center(axis, moving),
        cross_center(axis, relative_to, moving),
    )
}

/// Center of `moving` when placed at the start of an empty list.
pub fn go_into_start(axis: Axis, into: &BoxModel, moving: &BoxModel) -> Point {
    axis.point(
        axis.start(into.content_box) + from_start_to_center(axis, moving),
        cross_center(axis, into.content_box, moving),
    )
}

/// Where the dragged item's page border-box center settles for `impact`.
///
/// Includes the destination frame's scroll and, for fixed lists, the window scroll, so the
/// result lines up with what is on screen.
pub fn page_border_box_center(
    impact: &DragImpact,
    draggable: &DraggableDimension,
    destination: Option<&DroppableDimension>,
    dimensions: &DimensionMap,
    after_critical: &AfterCritical,
    viewport: &Viewport,
) -> Point {
    let original = draggable.page_center();
    let (Some(destination), Some(at)) = (destination, impact.at.as_ref()) else {
        return original;
    };
    let axis = destination.axis;
    let candidates = Candidates::new(draggable, destination, dimensions, after_critical);
    let movement = Some(&impact.movement);
    let center = match at {
        ImpactLocation::Combine(combine) => {
            let Some(rect) = candidates
                .position(&combine.draggable_id)
                .and_then(|i| candidates.border_box(i, movement))
            else {
                dwarn!(draggable_id = %combine.draggable_id, "combine target vanished");
                return original;
            };
            rect.center()
        }
        ImpactLocation::Reorder(location) => {
            let to = location.index.min(candidates.len());
            let is_home = draggable.droppable_id() == destination.id();
            if is_home && !destination.is_virtual() && to == candidates.from {
                original
            } else if let Some(before) = to
                .checked_sub(1)
                .and_then(|i| candidates.margin_box(i, movement))
            {
                go_after(axis, before, &draggable.page)
            } else if let Some(first) = candidates.margin_box(0, movement) {
                go_before(axis, first, &draggable.page)
            } else {
                go_into_start(axis, &destination.page, &draggable.page)
            }
        }
    };
    center + destination.scroll_displacement() + destination.window_shift(viewport)
}

/// Converts a page border-box center into the client space of the current viewport.
pub fn client_from_page_center(
    page_center: Point,
    draggable: &DraggableDimension,
    viewport: &Viewport,
) -> Point {
    let without_scroll = page_center + viewport.scroll.diff.displacement;
    let offset = without_scroll - draggable.page_center();
    draggable.client.border_box.center() + offset
}
