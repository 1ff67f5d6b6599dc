use kurbo::Rect;

use crate::droppable::DroppableDimension;
use crate::geometry::{Axis, is_partially_within, is_totally_within, is_totally_within_on_axis};
use crate::viewport::Viewport;

/// How much of a target must be seen for it to count as visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Partially,
    Totally,
    /// Totally visible along one axis; the other axis is ignored.
    TotallyOnAxis(Axis),
}

impl Visibility {
    fn through(self, frame: Rect, target: Rect) -> bool {
        match self {
            Self::Partially => is_partially_within(frame, target),
            Self::Totally => is_totally_within(frame, target),
            Self::TotallyOnAxis(axis) => is_totally_within_on_axis(axis, frame, target),
        }
    }
}

/// Whether `target` (page coordinates) can be seen through both the droppable's active
/// subject and the viewport.
///
/// With `with_droppable_displacement`, `target` is first moved by the droppable frame's
/// scroll so that it lines up with the subject. Fixed lists are moved along with the window.
pub fn is_visible(
    visibility: Visibility,
    target: Rect,
    destination: &DroppableDimension,
    viewport: &Viewport,
    with_droppable_displacement: bool,
) -> bool {
    let window_shift = destination.window_shift(viewport);
    let target = if with_droppable_displacement {
        target + destination.scroll_displacement() + window_shift
    } else {
        target
    };
    let Some(active) = destination.subject.active else {
        return false;
    };
    visibility.through(active + window_shift, target) && visibility.through(viewport.frame, target)
}

pub fn is_partially_visible(
    target: Rect,
    destination: &DroppableDimension,
    viewport: &Viewport,
) -> bool {
    is_visible(Visibility::Partially, target, destination, viewport, true)
}
