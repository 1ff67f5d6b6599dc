use kurbo::Vec2;

use crate::dimension_map::DimensionMap;
use crate::displacement::recompute_movement;
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::error::TransitionError;
use crate::impact::{AfterCritical, DragImpact, ImpactLocation, Movement};
use crate::options::DropAnimationOptions;
use crate::position::{client_from_page_center, page_border_box_center};
use crate::state::{CompletedDrag, DraggingState, PendingDrop};
use crate::types::{DragStart, DragUpdate, DropReason, DropResult};
use crate::viewport::Viewport;

/// The impact a drop settles on, and whether it landed inside a droppable.
///
/// Cancels and drops outside every list go home; a combine clears displacement since the
/// dragged item disappears into its target.
pub fn drop_impact(
    reason: DropReason,
    last: &DragImpact,
    on_lift: &DragImpact,
    home: &DroppableDimension,
    dimensions: &DimensionMap,
    after_critical: &AfterCritical,
    viewport: &Viewport,
) -> (DragImpact, bool) {
    let inside = reason == DropReason::Drop && last.at.is_some();
    if !inside {
        let movement = recompute_movement(
            &on_lift.movement,
            home,
            dimensions,
            after_critical,
            viewport,
            Some(true),
        );
        let impact = DragImpact {
            movement,
            at: on_lift.at.clone(),
        };
        return (impact, false);
    }
    match &last.at {
        Some(ImpactLocation::Combine(_)) => (
            DragImpact {
                movement: Movement::empty(last.movement.displaced_by),
                at: last.at.clone(),
            },
            true,
        ),
        _ => (last.clone(), true),
    }
}

/// Client offset from the original position to where the item comes to rest.
pub fn new_home_client_offset(
    impact: &DragImpact,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
    after_critical: &AfterCritical,
    viewport: &Viewport,
) -> Vec2 {
    let destination = impact
        .dragged_over()
        .and_then(|id| dimensions.droppable(id))
        .or_else(|| dimensions.droppable(draggable.droppable_id()));
    let page_center = page_border_box_center(
        impact,
        draggable,
        destination,
        dimensions,
        after_critical,
        viewport,
    );
    let client_center = client_from_page_center(page_center, draggable, viewport);
    client_center - draggable.client.border_box.center()
}

/// Duration of the settle animation, scaled by how far the item has to travel.
pub fn drop_duration_ms(
    current: Vec2,
    destination: Vec2,
    reason: DropReason,
    options: &DropAnimationOptions,
) -> u64 {
    let distance = (destination - current).hypot();
    if distance <= 0.0 {
        return options.min_duration_ms;
    }
    if distance >= options.max_duration_at_distance {
        return options.max_duration_ms;
    }
    let range = options.max_duration_ms.saturating_sub(options.min_duration_ms) as f64;
    let percentage = distance / options.max_duration_at_distance;
    let mut duration = options.min_duration_ms as f64 + range * percentage;
    if reason == DropReason::Cancel {
        duration *= options.cancel_modifier;
    }
    // Hosts schedule in 10ms steps.
    ((duration / 10.0).round() * 10.0) as u64
}

/// How a drop request resolves.
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// The item is already where it belongs.
    Complete(CompletedDrag),
    Animate(PendingDrop),
}

pub fn resolve_drop(
    drag: &DraggingState,
    reason: DropReason,
    options: &DropAnimationOptions,
) -> Result<DropOutcome, TransitionError> {
    let critical = &drag.critical;
    let draggable = drag
        .draggable()
        .ok_or_else(|| TransitionError::MissingDraggable(critical.draggable.id.clone()))?;
    let home = drag
        .home()
        .ok_or_else(|| TransitionError::MissingDroppable(critical.droppable.id.clone()))?;

    let (impact, inside) = drop_impact(
        reason,
        &drag.impact,
        &drag.on_lift_impact,
        home,
        &drag.dimensions,
        &drag.after_critical,
        &drag.viewport,
    );
    let (destination, combine) = if inside {
        (impact.destination().cloned(), impact.combine().cloned())
    } else {
        (None, None)
    };
    let start = DragStart::from_critical(critical, drag.movement_mode);
    let result = DropResult::new(DragUpdate::new(start, destination, combine), reason);

    let offset = new_home_client_offset(
        &impact,
        draggable,
        &drag.dimensions,
        &drag.after_critical,
        &drag.viewport,
    );
    let is_animation_required = drag.current.client.offset != offset || result.combine.is_some();
    let completed = CompletedDrag {
        critical: critical.clone(),
        result,
        impact,
        after_critical: drag.after_critical.clone(),
    };
    ddebug!(
        draggable_id = %critical.draggable.id,
        reason = reason.as_str(),
        animate = is_animation_required,
        "drop resolved"
    );
    if !is_animation_required {
        return Ok(DropOutcome::Complete(completed));
    }
    let drop_duration_ms = drop_duration_ms(drag.current.client.offset, offset, reason, options);
    Ok(DropOutcome::Animate(PendingDrop {
        completed,
        new_home_client_offset: offset,
        drop_duration_ms,
        dimensions: drag.dimensions.clone(),
    }))
}
