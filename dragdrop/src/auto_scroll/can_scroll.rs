use kurbo::Vec2;

use crate::droppable::DroppableDimension;
use crate::viewport::Viewport;

fn smallest_signed(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else if value > 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn remainder(target: f64, max: f64) -> f64 {
    if target < 0.0 {
        target
    } else if target > max {
        target - max
    } else {
        0.0
    }
}

/// The part of `change` that would scroll past the `0..=max` range.
pub fn overlap(current: Vec2, max: Vec2, change: Vec2) -> Option<Vec2> {
    let target = current + change;
    let overlap = Vec2::new(remainder(target.x, max.x), remainder(target.y, max.y));
    (overlap != Vec2::ZERO).then_some(overlap)
}

/// Whether at least one pixel of `change` can be scrolled.
pub fn can_partially_scroll(current: Vec2, max: Vec2, change: Vec2) -> bool {
    // A container can be scrolled beyond its reported max; treat that as the max.
    let max = Vec2::new(current.x.max(max.x), current.y.max(max.y));
    let smallest = Vec2::new(smallest_signed(change.x), smallest_signed(change.y));
    let Some(overlap) = overlap(current, max, smallest) else {
        return true;
    };
    (smallest.x != 0.0 && overlap.x == 0.0) || (smallest.y != 0.0 && overlap.y == 0.0)
}

pub fn can_scroll_window(viewport: &Viewport, change: Vec2) -> bool {
    can_partially_scroll(viewport.scroll.current, viewport.scroll.max, change)
}

pub fn window_overlap(viewport: &Viewport, change: Vec2) -> Option<Vec2> {
    if !can_scroll_window(viewport, change) {
        return None;
    }
    overlap(viewport.scroll.current, viewport.scroll.max, change)
}

pub fn can_scroll_droppable(droppable: &DroppableDimension, change: Vec2) -> bool {
    droppable
        .frame
        .is_some_and(|frame| can_partially_scroll(frame.scroll.current, frame.scroll.max, change))
}

pub fn droppable_overlap(droppable: &DroppableDimension, change: Vec2) -> Option<Vec2> {
    let frame = droppable.frame?;
    if !can_scroll_droppable(droppable, change) {
        return None;
    }
    overlap(frame.scroll.current, frame.scroll.max, change)
}
