use kurbo::{Point, Vec2};

use crate::dimension_map::DimensionMap;
use crate::displacement::{Candidates, MovementContext};
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::geometry::contains;
use crate::impact::{AfterCritical, DisplacedBy, DragImpact, ImpactLocation, Movement};
use crate::types::{Combine, DraggableLocation};
use crate::viewport::Viewport;

/// The droppable a dragged item is over.
///
/// Only enabled droppables of the same type whose active subject contains `center` qualify.
/// When lists are nested, the smallest active area wins. Fixed lists are moved along with the
/// window scroll before testing.
pub fn droppable_over<'a>(
    center: Point,
    draggable: &DraggableDimension,
    dimensions: &'a DimensionMap,
    viewport: &Viewport,
) -> Option<&'a DroppableDimension> {
    dimensions
        .droppables()
        .filter(|d| d.is_enabled && d.item_type() == &draggable.descriptor.item_type)
        .filter_map(|d| {
            let active = d.subject.active?;
            contains(active, center - d.window_shift(viewport)).then_some((d, active.area()))
        })
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(d, _)| d)
}

/// Inputs for resolving one impact against a known destination.
pub struct ResolveInput<'a> {
    /// Page border-box center of the dragged item.
    pub selection: Point,
    pub previous: &'a DragImpact,
    pub draggable: &'a DraggableDimension,
    pub destination: Option<&'a DroppableDimension>,
    pub dimensions: &'a DimensionMap,
    pub after_critical: &'a AfterCritical,
    pub viewport: &'a Viewport,
    pub combine_threshold_divisor: f64,
}

/// Resolves where the dragged item would land if released now.
pub fn resolve(input: &ResolveInput<'_>) -> DragImpact {
    let Some(destination) = input.destination.filter(|d| d.is_enabled) else {
        let axis = input
            .dimensions
            .droppable(input.draggable.droppable_id())
            .map(|home| home.axis)
            .unwrap_or_default();
        return DragImpact::none(DisplacedBy::of_item(axis, input.draggable.displace_by));
    };
    let axis = destination.axis;
    let size = axis.of_vec(input.draggable.displace_by);
    let target =
        input.selection + destination.scroll_diff() - destination.window_shift(input.viewport);
    let candidates = Candidates::new(
        input.draggable,
        destination,
        input.dimensions,
        input.after_critical,
    );
    let previous = (input.previous.dragged_over() == Some(destination.id()))
        .then_some(&input.previous.movement);

    if destination.is_combine_enabled {
        let hit = (0..candidates.len()).find(|&i| {
            candidates.border_box(i, previous).is_some_and(|rect| {
                let start = axis.start(rect);
                let end = axis.end(rect);
                let threshold = (end - start) / input.combine_threshold_divisor;
                let main = axis.of_point(target);
                main > start + threshold && main < end - threshold
            })
        });
        if let Some(i) = hit {
            let combine = Combine {
                draggable_id: candidates.items[i].id().clone(),
                droppable_id: destination.id().clone(),
            };
            let movement = previous
                .cloned()
                .unwrap_or_else(|| Movement::empty(DisplacedBy::new(axis, size)));
            return DragImpact {
                movement,
                at: Some(ImpactLocation::Combine(combine)),
            };
        }
    }

    let to = (0..candidates.len())
        .find(|&i| {
            candidates
                .border_box(i, previous)
                .is_some_and(|rect| axis.of_point(rect.center()) > axis.of_point(target))
        })
        .unwrap_or(candidates.len());

    let context = MovementContext {
        axis,
        destination,
        viewport: input.viewport,
        previous,
        force_should_animate: None,
    };
    DragImpact {
        movement: candidates.movement_to(to, size, &context),
        at: Some(ImpactLocation::Reorder(DraggableLocation {
            droppable_id: destination.id().clone(),
            index: to,
        })),
    }
}

/// Finds the droppable under the dragged item and resolves the impact there.
///
/// `page_offset` is how far the item has travelled in page coordinates since lift.
pub fn get_drag_impact(
    page_offset: Vec2,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
    previous: &DragImpact,
    viewport: &Viewport,
    after_critical: &AfterCritical,
    combine_threshold_divisor: f64,
) -> DragImpact {
    let selection = draggable.page_center() + page_offset;
    let destination = droppable_over(selection, draggable, dimensions, viewport);
    resolve(&ResolveInput {
        selection,
        previous,
        draggable,
        destination,
        dimensions,
        after_critical,
        viewport,
        combine_threshold_divisor,
    })
}
