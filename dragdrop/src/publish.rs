use crate::action::Published;
use crate::dimension_map::DimensionMap;
use crate::error::TransitionError;
use crate::lift::lift_effect;
use crate::options::DragOptions;
use crate::resolve::get_drag_impact;
use crate::state::DraggingState;

/// Logs index problems of `dimensions` and returns them.
pub fn check_indices(dimensions: &DimensionMap) -> Vec<crate::dimension_map::IndexIssue> {
    let issues = dimensions.check_indices();
    #[cfg(feature = "tracing")]
    for issue in &issues {
        dwarn!(%issue, "detected non-consecutive draggable indices");
    }
    issues
}

/// Applies dimension changes collected during a drag and re-resolves the impact.
///
/// Scroll updates for unknown droppables and additions into unknown droppables are
/// skipped with a warning. The critical draggable is never removed.
pub fn publish_while_dragging(
    drag: &DraggingState,
    published: &Published,
    options: &DragOptions,
) -> Result<DraggingState, TransitionError> {
    let mut dimensions = drag.dimensions.clone();

    for modified in &published.modified {
        match dimensions.droppable(&modified.droppable_id) {
            Some(existing) => {
                let scrolled = existing.scrolled_to(modified.scroll);
                dimensions = dimensions.with_droppable(scrolled);
            }
            None => {
                dwarn!(
                    droppable_id = %modified.droppable_id,
                    "scroll published for unknown droppable"
                );
            }
        }
    }

    let window_change = drag.viewport.scroll.diff.value;
    for addition in &published.additions {
        let Some(droppable) = dimensions.droppable(addition.droppable_id()) else {
            dwarn!(
                draggable_id = %addition.id(),
                droppable_id = %addition.droppable_id(),
                "draggable added to unknown droppable; skipping"
            );
            continue;
        };
        // Fixed lists ignore the window scroll, so only their own frame scroll applies.
        let offset =
            window_change - droppable.window_shift(&drag.viewport) + droppable.scroll_diff();
        let moved = addition.offset_by(offset, drag.viewport.scroll.initial);
        dimensions = dimensions.with_draggable(moved);
    }

    for id in &published.removals {
        if id == &drag.critical.draggable.id {
            dwarn!(draggable_id = %id, "ignoring removal of the dragged item");
            continue;
        }
        dimensions = dimensions.without_draggable(id);
    }

    check_indices(&dimensions);

    let draggable = dimensions
        .draggable(&drag.critical.draggable.id)
        .ok_or_else(|| TransitionError::MissingDraggable(drag.critical.draggable.id.clone()))?;
    let home = dimensions
        .droppable(&drag.critical.droppable.id)
        .ok_or_else(|| TransitionError::MissingDroppable(drag.critical.droppable.id.clone()))?;

    let (on_lift_impact, after_critical) =
        lift_effect(draggable, home, &dimensions, &drag.viewport);
    // Keep a combine alive across the publish; anything else starts over from home.
    let was_over_combine = drag
        .destination()
        .is_some_and(|over| over.is_combine_enabled);
    let previous = if was_over_combine {
        &drag.impact
    } else {
        &on_lift_impact
    };
    let impact = get_drag_impact(
        drag.current.page.offset,
        draggable,
        &dimensions,
        previous,
        &drag.viewport,
        &after_critical,
        options.combine_threshold_divisor,
    );
    ddebug!(
        additions = published.additions.len(),
        removals = published.removals.len(),
        modified = published.modified.len(),
        "published while dragging"
    );

    let dimensions = dimensions.with_placeholders(draggable, &drag.impact, &impact);
    Ok(DraggingState {
        dimensions,
        impact,
        on_lift_impact,
        after_critical,
        force_should_animate: Some(false),
        ..drag.clone()
    })
}
