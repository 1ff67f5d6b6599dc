use crate::dimension_map::DimensionMap;
use crate::displacement::{Candidates, MovementContext};
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::impact::{AfterCritical, DisplacedBy, DragImpact, ImpactLocation};
use crate::types::DraggableLocation;
use crate::viewport::Viewport;

/// The impact of an item sitting in its home slot, plus the after-critical snapshot.
///
/// In a standard list nothing moves at lift. A virtual list drops the lifted item, so its
/// later siblings start out displaced forward (without animation) to keep the slot open.
pub fn lift_effect(
    draggable: &DraggableDimension,
    home: &DroppableDimension,
    dimensions: &DimensionMap,
    viewport: &Viewport,
) -> (DragImpact, AfterCritical) {
    let axis = home.axis;
    let displaced_by = DisplacedBy::of_item(axis, draggable.displace_by);
    let effected = dimensions
        .inside(home.id())
        .into_iter()
        .filter(|d| d.id() != draggable.id() && d.index() > draggable.index())
        .map(|d| d.id().clone())
        .collect();
    let after_critical = AfterCritical {
        effected,
        displaced_by,
        in_virtual_list: home.is_virtual(),
    };

    let candidates = Candidates::new(draggable, home, dimensions, &after_critical);
    let to = candidates
        .items
        .iter()
        .take_while(|c| c.dimension.index() < draggable.index())
        .count();
    let context = MovementContext {
        axis,
        destination: home,
        viewport,
        previous: None,
        force_should_animate: Some(false),
    };
    let impact = DragImpact {
        movement: candidates.movement_to(to, displaced_by.value, &context),
        at: Some(ImpactLocation::Reorder(DraggableLocation {
            droppable_id: home.id().clone(),
            index: draggable.index(),
        })),
    };
    (impact, after_critical)
}
