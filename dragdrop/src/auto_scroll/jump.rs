use kurbo::{Point, Vec2};

use super::ScrollRequest;
use super::can_scroll::{can_scroll_droppable, can_scroll_window, droppable_overlap, window_overlap};
use crate::state::DraggingState;

/// The discrete scroll that brings a keyboard move into view.
#[derive(Clone, Debug, PartialEq)]
pub struct JumpScroll {
    /// Scrolls to perform in order.
    pub requests: Vec<ScrollRequest>,
    /// Whatever could not be scrolled is applied by moving the item to this client point.
    pub move_to: Option<Point>,
}

/// Splits `change` into what a container can scroll and what remains.
fn as_much_as_it_can(change: Vec2, overlap: Option<Vec2>) -> (Vec2, Option<Vec2>) {
    match overlap {
        None => (change, None),
        Some(overlap) => (change - overlap, Some(overlap)),
    }
}

/// Plans the jump for the drag's pending `scroll_jump_request`.
///
/// The destination list scrolls as far as it can, then the window, then the item moves by
/// the remainder.
pub fn jump_scroll(drag: &DraggingState) -> Option<JumpScroll> {
    let request = drag.scroll_jump_request?;
    let mut requests = Vec::new();
    let mut remainder = request;

    if let Some(droppable) = drag.destination() {
        if can_scroll_droppable(droppable, remainder) {
            let overlap = droppable_overlap(droppable, remainder);
            let (scrolled, rest) = as_much_as_it_can(remainder, overlap);
            requests.push(ScrollRequest::Droppable {
                id: droppable.id().clone(),
                change: scrolled,
            });
            match rest {
                Some(rest) => remainder = rest,
                None => return Some(JumpScroll { requests, move_to: None }),
            }
        }
    } else {
        dwarn!("jump scroll requested while not over a droppable");
    }

    if drag.is_window_scroll_allowed && can_scroll_window(&drag.viewport, remainder) {
        let overlap = window_overlap(&drag.viewport, remainder);
        let (scrolled, rest) = as_much_as_it_can(remainder, overlap);
        requests.push(ScrollRequest::Window { change: scrolled });
        match rest {
            Some(rest) => remainder = rest,
            None => return Some(JumpScroll { requests, move_to: None }),
        }
    }

    Some(JumpScroll {
        requests,
        move_to: Some(drag.current.client.selection + remainder),
    })
}
