use kurbo::{Point, Vec2};

use crate::action::{Action, InitialPublish};
use crate::dimension_map::DimensionMap;
use crate::displacement::recompute_movement;
use crate::drop::{DropOutcome, resolve_drop};
use crate::droppable::DroppableDimension;
use crate::error::TransitionError;
use crate::impact::DragImpact;
use crate::keyboard::move_in_direction;
use crate::lift::lift_effect;
use crate::options::DragOptions;
use crate::position::{DragPositions, client_from_page_center, page_border_box_center};
use crate::publish::{check_indices, publish_while_dragging};
use crate::resolve::get_drag_impact;
use crate::state::{
    CompletedDrag, DragState, DraggingState, DropPendingState, IdleState, PreparingState,
};
use crate::types::{DropReason, DropResult, MovementMode};
use crate::viewport::Viewport;

/// Applies `action` to `state` with default options.
///
/// See [`transition_with`].
pub fn transition(state: &DragState, action: Action) -> Result<DragState, TransitionError> {
    transition_with(state, action, &DragOptions::default())
}

/// The drag state machine.
///
/// Pure: the input state is never modified, so on `Err` the caller still holds a valid
/// snapshot. Every (phase, action) pair either produces a state or is one of the documented
/// contract violations.
pub fn transition_with(
    state: &DragState,
    action: Action,
    options: &DragOptions,
) -> Result<DragState, TransitionError> {
    let kind = action.kind();
    let phase = state.phase();
    dtrace!(action = kind.as_str(), phase = phase.as_str(), "transition");
    let invalid = TransitionError::InvalidPhase { action: kind, phase };

    match action {
        Action::Flush => Ok(flush(state)),
        Action::Lift {
            draggable_id,
            client_selection,
            movement_mode,
        } => match state {
            DragState::Idle(_) => Ok(DragState::Preparing(PreparingState {
                draggable_id,
                client_selection,
                movement_mode,
            })),
            _ => Err(invalid),
        },
        Action::InitialPublish(publish) => match state {
            DragState::Preparing(preparing) => initial_publish(preparing, publish),
            _ => Err(invalid),
        },
        Action::CollectionStarting => match state {
            DragState::Dragging(drag) => Ok(DragState::Collecting(drag.clone())),
            DragState::Preparing(_) => Err(invalid),
            _ => Ok(state.clone()),
        },
        Action::PublishWhileDragging(published) => match state {
            DragState::Collecting(drag) => Ok(DragState::Dragging(publish_while_dragging(
                drag, &published, options,
            )?)),
            DragState::DropPending(pending) => Ok(DragState::DropPending(DropPendingState {
                drag: publish_while_dragging(&pending.drag, &published, options)?,
                reason: pending.reason,
                is_waiting: false,
            })),
            _ => Err(invalid),
        },
        Action::Drop { reason } => match state {
            DragState::Idle(_) => Ok(state.clone()),
            DragState::Preparing(_) => Ok(idle(None, false)),
            DragState::Dragging(drag) => drop(drag, reason, options),
            DragState::Collecting(drag) => Ok(DragState::DropPending(DropPendingState {
                drag: drag.clone(),
                reason,
                is_waiting: true,
            })),
            DragState::DropPending(pending) if pending.is_waiting => {
                Err(TransitionError::DropAlreadyPending)
            }
            DragState::DropPending(pending) => drop(&pending.drag, pending.reason, options),
            DragState::DropAnimating(_) => Err(invalid),
        },
        Action::DropAnimationFinished | Action::DropComplete => match state {
            DragState::DropAnimating(pending) => Ok(idle(Some(pending.completed.clone()), false)),
            _ => Err(invalid),
        },
        movement if movement.is_movement() => match state {
            DragState::Dragging(drag) => Ok(DragState::Dragging(apply_movement(
                drag, movement, options, false,
            )?)),
            DragState::Collecting(drag) => Ok(DragState::Collecting(apply_movement(
                drag, movement, options, true,
            )?)),
            DragState::Preparing(_) => Err(invalid),
            _ => Ok(state.clone()),
        },
        _ => Err(invalid),
    }
}

fn idle(completed: Option<CompletedDrag>, should_flush: bool) -> DragState {
    DragState::Idle(IdleState {
        completed,
        should_flush,
    })
}

/// Tears down whatever is live. A drag in progress ends as a cancellation; a drop that is
/// still animating keeps its result.
fn flush(state: &DragState) -> DragState {
    let completed = match state {
        DragState::DropAnimating(pending) => Some(pending.completed.clone()),
        _ => state.dragging().map(|drag| CompletedDrag {
            critical: drag.critical.clone(),
            result: DropResult::cancelled(&drag.critical, drag.movement_mode),
            impact: drag.on_lift_impact.clone(),
            after_critical: drag.after_critical.clone(),
        }),
    };
    idle(completed, true)
}

fn initial_publish(
    preparing: &PreparingState,
    publish: InitialPublish,
) -> Result<DragState, TransitionError> {
    let InitialPublish {
        critical,
        dimensions,
        viewport,
        is_window_scroll_allowed,
    } = publish;
    if critical.draggable.id != preparing.draggable_id {
        return Err(TransitionError::CriticalMismatch {
            expected: preparing.draggable_id.clone(),
            found: critical.draggable.id,
        });
    }
    check_indices(&dimensions);
    // A fixed list would slide away from the pointer if the engine scrolled the window.
    let is_window_scroll_allowed =
        is_window_scroll_allowed && dimensions.droppables().all(|d| !d.is_fixed_on_page);
    let draggable = dimensions
        .draggable(&critical.draggable.id)
        .ok_or_else(|| TransitionError::MissingDraggable(critical.draggable.id.clone()))?;
    let home = dimensions
        .droppable(&critical.droppable.id)
        .ok_or_else(|| TransitionError::MissingDroppable(critical.droppable.id.clone()))?;

    let initial = DragPositions::initial(preparing.client_selection, draggable, &viewport);
    let (impact, after_critical) = lift_effect(draggable, home, &dimensions, &viewport);
    ddebug!(
        draggable_id = %critical.draggable.id,
        droppable_id = %critical.droppable.id,
        mode = preparing.movement_mode.as_str(),
        draggables = dimensions.draggable_count(),
        "drag started"
    );
    Ok(DragState::Dragging(DraggingState {
        critical,
        movement_mode: preparing.movement_mode,
        dimensions,
        initial,
        current: initial,
        on_lift_impact: impact.clone(),
        impact,
        after_critical,
        viewport,
        is_window_scroll_allowed,
        scroll_jump_request: None,
        force_should_animate: None,
    }))
}

fn drop(
    drag: &DraggingState,
    reason: DropReason,
    options: &DragOptions,
) -> Result<DragState, TransitionError> {
    Ok(match resolve_drop(drag, reason, &options.drop_animation)? {
        DropOutcome::Complete(completed) => idle(Some(completed), false),
        DropOutcome::Animate(pending) => DragState::DropAnimating(pending),
    })
}

/// Inputs that override the current drag state in [`update`].
#[derive(Default)]
struct Update {
    client_selection: Option<Point>,
    dimensions: Option<DimensionMap>,
    viewport: Option<Viewport>,
    impact: Option<DragImpact>,
    scroll_jump_request: Option<Vec2>,
}

/// Recomputes positions and, outside collection, the impact.
fn update(
    drag: &DraggingState,
    changes: Update,
    options: &DragOptions,
    collecting: bool,
) -> DraggingState {
    let viewport = changes.viewport.unwrap_or(drag.viewport);
    let dimensions = changes.dimensions.unwrap_or_else(|| drag.dimensions.clone());
    let client_selection = changes
        .client_selection
        .unwrap_or(drag.current.client.selection);
    let current = DragPositions::current(&drag.initial, client_selection, &viewport);

    if collecting {
        return DraggingState {
            dimensions,
            viewport,
            current,
            ..drag.clone()
        };
    }

    let Some(draggable) = dimensions.draggable(&drag.critical.draggable.id) else {
        dwarn!(draggable_id = %drag.critical.draggable.id, "dragged item vanished; keeping impact");
        return DraggingState {
            dimensions: dimensions.clone(),
            viewport,
            current,
            ..drag.clone()
        };
    };
    let impact = changes.impact.unwrap_or_else(|| {
        get_drag_impact(
            current.page.offset,
            draggable,
            &dimensions,
            &drag.impact,
            &viewport,
            &drag.after_critical,
            options.combine_threshold_divisor,
        )
    });
    let dimensions = dimensions.with_placeholders(draggable, &drag.impact, &impact);
    let force_should_animate = changes.scroll_jump_request.map(|_| false);
    DraggingState {
        dimensions,
        viewport,
        current,
        impact,
        scroll_jump_request: changes.scroll_jump_request,
        force_should_animate,
        ..drag.clone()
    }
}

/// Keyboard drags keep their slot when geometry shifts: only visibility is refreshed and the
/// selection follows the slot.
fn refresh_snap(
    drag: &DraggingState,
    dimensions: Option<DimensionMap>,
    viewport: Option<Viewport>,
    options: &DragOptions,
    collecting: bool,
) -> DraggingState {
    let dims = dimensions.unwrap_or_else(|| drag.dimensions.clone());
    let viewport = viewport.unwrap_or(drag.viewport);
    let destination = drag.impact.dragged_over().and_then(|id| dims.droppable(id));
    let draggable = dims.draggable(&drag.critical.draggable.id);
    let (Some(draggable), Some(destination)) = (draggable, destination) else {
        return update(
            drag,
            Update {
                dimensions: Some(dims.clone()),
                viewport: Some(viewport),
                ..Update::default()
            },
            options,
            collecting,
        );
    };
    let movement = recompute_movement(
        &drag.impact.movement,
        destination,
        &dims,
        &drag.after_critical,
        &viewport,
        None,
    );
    let impact = DragImpact {
        movement,
        at: drag.impact.at.clone(),
    };
    let page_center = page_border_box_center(
        &impact,
        draggable,
        Some(destination),
        &dims,
        &drag.after_critical,
        &viewport,
    );
    let client_selection = client_from_page_center(page_center, draggable, &viewport);
    update(
        drag,
        Update {
            client_selection: Some(client_selection),
            dimensions: Some(dims.clone()),
            viewport: Some(viewport),
            impact: Some(impact),
            scroll_jump_request: None,
        },
        options,
        collecting,
    )
}

fn patch_droppable(
    drag: &DraggingState,
    updated: DroppableDimension,
    is_enabled_changing: bool,
    options: &DragOptions,
    collecting: bool,
) -> DraggingState {
    let dimensions = drag.dimensions.with_droppable(updated);
    if drag.movement_mode == MovementMode::Snap && !is_enabled_changing {
        return refresh_snap(drag, Some(dimensions), None, options, collecting);
    }
    update(
        drag,
        Update {
            dimensions: Some(dimensions),
            ..Update::default()
        },
        options,
        collecting,
    )
}

/// Movement-class events. While collecting, positions follow but the impact is frozen.
fn apply_movement(
    drag: &DraggingState,
    action: Action,
    options: &DragOptions,
    collecting: bool,
) -> Result<DraggingState, TransitionError> {
    let is_snap = drag.movement_mode == MovementMode::Snap;
    Ok(match action {
        Action::Move { client } => {
            if client == drag.current.client.selection {
                return Ok(drag.clone());
            }
            let impact = is_snap.then(|| drag.impact.clone());
            update(
                drag,
                Update {
                    client_selection: Some(client),
                    impact,
                    ..Update::default()
                },
                options,
                collecting,
            )
        }
        Action::MoveByWindowScroll { new_scroll } => {
            if new_scroll == drag.viewport.scroll.current {
                return Ok(drag.clone());
            }
            let viewport = drag.viewport.scrolled_to(new_scroll);
            if is_snap {
                refresh_snap(drag, None, Some(viewport), options, collecting)
            } else {
                update(
                    drag,
                    Update {
                        viewport: Some(viewport),
                        ..Update::default()
                    },
                    options,
                    collecting,
                )
            }
        }
        Action::UpdateViewportMaxScroll { max_scroll } => {
            if max_scroll == drag.viewport.scroll.max {
                return Ok(drag.clone());
            }
            DraggingState {
                viewport: drag.viewport.with_max_scroll(max_scroll),
                ..drag.clone()
            }
        }
        Action::UpdateDroppableScroll { id, new_scroll } => {
            let target = drag
                .dimensions
                .droppable(&id)
                .ok_or(TransitionError::MissingDroppable(id))?;
            patch_droppable(drag, target.scrolled_to(new_scroll), false, options, collecting)
        }
        Action::UpdateDroppableIsEnabled { id, is_enabled } => {
            let target = drag
                .dimensions
                .droppable(&id)
                .ok_or(TransitionError::MissingDroppable(id))?;
            if target.is_enabled == is_enabled {
                return Ok(drag.clone());
            }
            let patched = target.clone().with_enabled(is_enabled);
            patch_droppable(drag, patched, true, options, collecting)
        }
        Action::UpdateDroppableIsCombineEnabled {
            id,
            is_combine_enabled,
        } => {
            let target = drag
                .dimensions
                .droppable(&id)
                .ok_or(TransitionError::MissingDroppable(id))?;
            if target.is_combine_enabled == is_combine_enabled {
                return Ok(drag.clone());
            }
            patch_droppable(
                drag,
                target.clone().with_combine_enabled(is_combine_enabled),
                true,
                options,
                collecting,
            )
        }
        Action::MoveInDirection(direction) => {
            // Keyboard steps are impact changes; they wait for collection to finish.
            if collecting {
                return Ok(drag.clone());
            }
            let Some(step) = move_in_direction(drag, direction) else {
                return Ok(drag.clone());
            };
            update(
                drag,
                Update {
                    client_selection: Some(step.client_selection),
                    impact: Some(step.impact),
                    scroll_jump_request: step.scroll_jump_request,
                    ..Update::default()
                },
                options,
                collecting,
            )
        }
        _ => drag.clone(),
    })
}
