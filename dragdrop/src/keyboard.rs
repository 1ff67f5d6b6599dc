use kurbo::{Point, Rect, Vec2};

use crate::dimension_map::DimensionMap;
use crate::displacement::{Candidates, MovementContext, recompute_movement};
use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::geometry::{Axis, is_partially_within};
use crate::impact::{AfterCritical, DisplacedBy, DragImpact, ImpactLocation, Movement};
use crate::position::{client_from_page_center, page_border_box_center};
use crate::state::DraggingState;
use crate::types::{Combine, DraggableLocation, MoveDirection};
use crate::viewport::Viewport;
use crate::visibility::{Visibility, is_visible};

/// Result of one keyboard step.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapMove {
    pub impact: DragImpact,
    pub client_selection: Point,
    /// Set when the new spot is off screen: scroll by this much, then the item follows.
    pub scroll_jump_request: Option<Vec2>,
}

/// Moves the dragged item one step in `direction`.
///
/// Returns `None` when the step is not possible (end of a list, no list on that side,
/// destination disabled).
pub fn move_in_direction(state: &DraggingState, direction: MoveDirection) -> Option<SnapMove> {
    let draggable = state.draggable()?;
    let destination = state.destination()?;
    let on_main_axis = direction.is_vertical() == (destination.axis == Axis::Vertical);
    if on_main_axis {
        move_to_next_place(state, draggable, destination, direction.is_forward())
    } else {
        move_cross_axis(state, draggable, destination, direction.is_forward())
    }
}

fn move_to_next_place(
    state: &DraggingState,
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    is_forward: bool,
) -> Option<SnapMove> {
    if !destination.is_enabled {
        return None;
    }
    let candidates =
        Candidates::new(draggable, destination, &state.dimensions, &state.after_critical);
    let impact = next_combine(state, &candidates, destination, is_forward)
        .or_else(|| next_index(state, &candidates, draggable, destination, is_forward))?;

    let page_center = page_border_box_center(
        &impact,
        draggable,
        Some(destination),
        &state.dimensions,
        &state.after_critical,
        &state.viewport,
    );
    let visibility = Visibility::TotallyOnAxis(destination.axis);
    let viewport = &state.viewport;
    if is_visible_in_new_location(draggable, destination, page_center, viewport, visibility) {
        return Some(SnapMove {
            impact,
            client_selection: client_from_page_center(page_center, draggable, viewport),
            scroll_jump_request: None,
        });
    }

    let distance = page_center - state.current.page.border_box_center;
    let impact = speculatively_increase(
        &impact,
        destination,
        &state.dimensions,
        &state.after_critical,
        &state.viewport,
        distance,
    );
    Some(SnapMove {
        impact,
        client_selection: state.current.client.selection,
        scroll_jump_request: Some(distance),
    })
}

/// From a reorder, a step first combines with the neighbour the item would pass.
fn next_combine(
    state: &DraggingState,
    candidates: &Candidates<'_>,
    destination: &DroppableDimension,
    is_forward: bool,
) -> Option<DragImpact> {
    if !destination.is_combine_enabled {
        return None;
    }
    let location = state.impact.destination()?;
    let target = if is_forward {
        location.index
    } else {
        location.index.checked_sub(1)?
    };
    let candidate = candidates.items.get(target)?;
    Some(DragImpact {
        movement: state.impact.movement.clone(),
        at: Some(ImpactLocation::Combine(Combine {
            draggable_id: candidate.id().clone(),
            droppable_id: destination.id().clone(),
        })),
    })
}

fn next_index(
    state: &DraggingState,
    candidates: &Candidates<'_>,
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    is_forward: bool,
) -> Option<DragImpact> {
    let proposed = match &state.impact.at {
        Some(ImpactLocation::Reorder(location)) => {
            if is_forward {
                location.index + 1
            } else {
                location.index.checked_sub(1)?
            }
        }
        Some(ImpactLocation::Combine(combine)) => {
            let position = candidates.position(&combine.draggable_id)?;
            if is_forward { position + 1 } else { position }
        }
        None => return None,
    };
    if proposed > candidates.len() {
        return None;
    }
    let axis = destination.axis;
    let context = MovementContext {
        axis,
        destination,
        viewport: &state.viewport,
        previous: Some(&state.impact.movement),
        force_should_animate: None,
    };
    Some(DragImpact {
        movement: candidates.movement_to(proposed, axis.of_vec(draggable.displace_by), &context),
        at: Some(ImpactLocation::Reorder(DraggableLocation {
            droppable_id: destination.id().clone(),
            index: proposed,
        })),
    })
}

fn is_visible_in_new_location(
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    new_page_center: Point,
    viewport: &Viewport,
    visibility: Visibility,
) -> bool {
    let shifted = draggable.page.border_box + (new_page_center - draggable.page_center());
    is_visible(visibility, shifted, destination, viewport, false)
}

/// Marks displaced items visible if they would be after a jump of `max_scroll_change`.
///
/// Items keep their animation flag from whichever view first sees them; unseen ones jump.
fn speculatively_increase(
    impact: &DragImpact,
    destination: &DroppableDimension,
    dimensions: &DimensionMap,
    after_critical: &AfterCritical,
    viewport: &Viewport,
    max_scroll_change: Vec2,
) -> DragImpact {
    let scrolled_viewport = viewport.scrolled_to(viewport.scroll.current + max_scroll_change);
    let scrolled_destination = destination
        .frame
        .map(|frame| destination.scrolled_to(frame.scroll.current + max_scroll_change));
    let last = &impact.movement;
    let with_viewport_scroll = recompute_movement(
        last,
        destination,
        dimensions,
        after_critical,
        &scrolled_viewport,
        Some(false),
    );
    let with_droppable_scroll = scrolled_destination.as_ref().map(|scrolled| {
        recompute_movement(last, scrolled, dimensions, after_critical, viewport, Some(false))
    });
    let groups: Vec<&Movement> = [
        Some(last),
        Some(&with_viewport_scroll),
        with_droppable_scroll.as_ref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    let displaced = last
        .displaced
        .iter()
        .map(|d| {
            let seen = groups
                .iter()
                .filter_map(|group| group.get(&d.draggable_id))
                .find(|candidate| candidate.is_visible);
            match seen {
                Some(seen) => seen.clone(),
                None => d.clone(),
            }
        })
        .collect();
    DragImpact {
        movement: Movement {
            displaced,
            displaced_by: last.displaced_by,
        },
        at: impact.at.clone(),
    }
}

fn move_cross_axis(
    state: &DraggingState,
    draggable: &DraggableDimension,
    source: &DroppableDimension,
    is_forward: bool,
) -> Option<SnapMove> {
    let previous_center = state.current.page.border_box_center;
    let destination = best_cross_axis_droppable(
        is_forward,
        previous_center,
        draggable,
        source,
        &state.dimensions,
        &state.viewport,
    )?;
    let impact = move_to_new_droppable(state, draggable, destination, previous_center)?;
    let page_center = page_border_box_center(
        &impact,
        draggable,
        Some(destination),
        &state.dimensions,
        &state.after_critical,
        &state.viewport,
    );
    Some(SnapMove {
        impact,
        client_selection: client_from_page_center(page_center, draggable, &state.viewport),
        scroll_jump_request: None,
    })
}

fn corners(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x0, r.y1),
        Point::new(r.x1, r.y1),
    ]
}

fn closest_corner(p: Point, r: Rect) -> f64 {
    corners(r)
        .into_iter()
        .map(|c| p.distance(c))
        .fold(f64::INFINITY, f64::min)
}

fn spans_overlap(axis: Axis, a: Rect, b: Rect) -> bool {
    let within = |r: Rect, v: f64| v >= axis.start(r) && v <= axis.end(r);
    within(a, axis.start(b))
        || within(a, axis.end(b))
        || within(b, axis.start(a))
        || within(b, axis.end(a))
}

/// The nearest droppable on the `is_forward` side of `source` across its axis.
fn best_cross_axis_droppable<'a>(
    is_forward: bool,
    page_center: Point,
    draggable: &DraggableDimension,
    source: &DroppableDimension,
    dimensions: &'a DimensionMap,
    viewport: &Viewport,
) -> Option<&'a DroppableDimension> {
    let active = source.subject.active?;
    let axis = source.axis;
    let cross = axis.cross();
    let mut candidates: Vec<(&DroppableDimension, Rect)> = dimensions
        .droppables()
        .filter(|d| d.id() != source.id() && d.is_enabled)
        .filter(|d| d.item_type() == &draggable.descriptor.item_type)
        .filter_map(|d| d.subject.active.map(|a| (d, a)))
        .filter(|(_, target)| is_partially_within(viewport.frame, *target))
        .filter(|(_, target)| {
            if is_forward {
                cross.end(active) < cross.end(*target)
            } else {
                cross.start(*target) < cross.start(active)
            }
        })
        .filter(|(_, target)| spans_overlap(axis, active, *target))
        .collect();
    candidates.sort_by(|(_, a), (_, b)| {
        let order = cross.start(*a).total_cmp(&cross.start(*b));
        if is_forward { order } else { order.reverse() }
    });
    let nearest = cross.start(candidates.first()?.1);
    candidates.retain(|(_, r)| cross.start(*r) == nearest);
    if candidates.len() == 1 {
        return candidates.first().map(|(d, _)| *d);
    }

    let main = axis.of_point(page_center);
    let mut containing: Vec<_> = candidates
        .iter()
        .filter(|(_, r)| main >= axis.start(*r) && main <= axis.end(*r))
        .copied()
        .collect();
    if !containing.is_empty() {
        containing.sort_by(|(_, a), (_, b)| axis.start(*a).total_cmp(&axis.start(*b)));
        return containing.first().map(|(d, _)| *d);
    }
    candidates.sort_by(|(_, a), (_, b)| {
        closest_corner(page_center, *a)
            .total_cmp(&closest_corner(page_center, *b))
            .then_with(|| axis.start(*a).total_cmp(&axis.start(*b)))
    });
    candidates.first().map(|(d, _)| *d)
}

fn move_to_new_droppable(
    state: &DraggingState,
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    previous_center: Point,
) -> Option<DragImpact> {
    let axis = destination.axis;
    let candidates =
        Candidates::new(draggable, destination, &state.dimensions, &state.after_critical);
    let is_home = draggable.droppable_id() == destination.id();

    // The dragged item counts as a landmark when returning home.
    let home_slot = is_home.then(|| (candidates.from, draggable.page.border_box, true));
    let displacement = destination.scroll_displacement();
    let closest = candidates
        .items
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.border_box, false))
        .chain(home_slot)
        .filter(|(_, rect, _)| {
            is_visible(Visibility::Totally, *rect, destination, &state.viewport, true)
        })
        .min_by(|(ia, a, _), (ib, b, _)| {
            previous_center
                .distance(a.center() + displacement)
                .total_cmp(&previous_center.distance(b.center() + displacement))
                .then_with(|| ia.cmp(ib))
        });

    let index = match closest {
        Some((i, rect, is_self)) => {
            if is_self || axis.of_point(previous_center) <= axis.of_point(rect.center()) {
                i
            } else {
                i + 1
            }
        }
        None => {
            if !candidates.items.is_empty() {
                return None;
            }
            let proposed = DragImpact {
                movement: Movement::empty(DisplacedBy::of_item(axis, draggable.displace_by)),
                at: Some(ImpactLocation::Reorder(DraggableLocation {
                    droppable_id: destination.id().clone(),
                    index: 0,
                })),
            };
            let center = page_border_box_center(
                &proposed,
                draggable,
                Some(destination),
                &state.dimensions,
                &state.after_critical,
                &state.viewport,
            );
            let with_placeholder = if is_home {
                destination.clone()
            } else {
                destination.with_placeholder(draggable, &[])
            };
            let visibility = Visibility::TotallyOnAxis(axis);
            let fits = is_visible_in_new_location(
                draggable,
                &with_placeholder,
                center,
                &state.viewport,
                visibility,
            );
            return fits.then_some(proposed);
        }
    };

    let context = MovementContext {
        axis,
        destination,
        viewport: &state.viewport,
        previous: None,
        force_should_animate: None,
    };
    Some(DragImpact {
        movement: candidates.movement_to(index, axis.of_vec(draggable.displace_by), &context),
        at: Some(ImpactLocation::Reorder(DraggableLocation {
            droppable_id: destination.id().clone(),
            index,
        })),
    })
}

