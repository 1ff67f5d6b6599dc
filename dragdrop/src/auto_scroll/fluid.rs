use kurbo::{Point, Rect};

use super::ScrollRequest;
use super::can_scroll::{can_scroll_droppable, can_scroll_window};
use super::speed::{Dampening, scroll_speed};
use crate::dimension_map::DimensionMap;
use crate::droppable::DroppableDimension;
use crate::geometry::contains;
use crate::options::AutoScrollOptions;
use crate::state::DraggingState;
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FluidDrag {
    drag_start_ms: u64,
    should_use_time_dampening: bool,
}

/// Continuous edge scrolling for pointer drags.
///
/// The scroller only decides; the caller executes the returned request and asks again on
/// the next frame for as long as requests keep coming.
#[derive(Clone, Debug, Default)]
pub struct FluidScroller {
    dragging: Option<FluidDrag>,
}

impl FluidScroller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.dragging.is_some()
    }

    /// Starts tracking a drag. Returns `true` when the item was lifted inside a scroll zone.
    ///
    /// Lifting inside a zone turns on time damping, so the list does not race away before
    /// the user has moved.
    pub fn start(
        &mut self,
        drag: &DraggingState,
        now_ms: u64,
        options: &AutoScrollOptions,
    ) -> bool {
        debug_assert!(self.dragging.is_none(), "fluid scroller started twice");
        let undamped = Dampening {
            run_time_ms: 0,
            enabled: false,
        };
        let was_scroll_needed = plan(drag, undamped, options).is_some();
        self.dragging = Some(FluidDrag {
            drag_start_ms: now_ms,
            should_use_time_dampening: was_scroll_needed,
        });
        ddebug!(dampened = was_scroll_needed, "fluid scroller started");
        was_scroll_needed
    }

    pub fn stop(&mut self) {
        if self.dragging.take().is_some() {
            dtrace!("fluid scroller stopped");
        }
    }

    /// The scroll to perform this frame, if any.
    pub fn scroll(
        &self,
        drag: &DraggingState,
        now_ms: u64,
        options: &AutoScrollOptions,
    ) -> Option<ScrollRequest> {
        let fluid = self.dragging?;
        if options.disabled {
            return None;
        }
        let dampening = Dampening {
            run_time_ms: now_ms.saturating_sub(fluid.drag_start_ms),
            enabled: fluid.should_use_time_dampening,
        };
        plan(drag, dampening, options)
    }
}

/// Scroll the list under the item first; fall back to the window.
fn plan(
    drag: &DraggingState,
    dampening: Dampening,
    options: &AutoScrollOptions,
) -> Option<ScrollRequest> {
    let center = drag.current.page.border_box_center;
    let subject = drag.draggable()?.page.margin_box;

    if let Some(droppable) = best_scrollable_droppable(drag, center) {
        let local = center - droppable.window_shift(&drag.viewport);
        if let Some(change) = droppable_change(droppable, subject, local, dampening, options) {
            return Some(ScrollRequest::Droppable {
                id: droppable.id().clone(),
                change,
            });
        }
    }

    if drag.is_window_scroll_allowed {
        let viewport = &drag.viewport;
        if let Some(change) = scroll_speed(viewport.frame, subject, center, dampening, options)
            .filter(|change| can_scroll_window(viewport, *change))
        {
            return Some(ScrollRequest::Window { change });
        }
    }
    None
}

fn droppable_change(
    droppable: &DroppableDimension,
    subject: Rect,
    center: Point,
    dampening: Dampening,
    options: &AutoScrollOptions,
) -> Option<kurbo::Vec2> {
    let frame = droppable.frame?;
    scroll_speed(frame.page.margin_box, subject, center, dampening, options)
        .filter(|change| can_scroll_droppable(droppable, *change))
}

/// The list being dragged over, or any scrollable list under `center`.
fn best_scrollable_droppable(drag: &DraggingState, center: Point) -> Option<&DroppableDimension> {
    match drag.impact.dragged_over() {
        Some(id) => drag.dimensions.droppable(id).filter(|d| d.frame.is_some()),
        None => scrollable_droppable_over(center, &drag.dimensions, &drag.viewport),
    }
}

fn scrollable_droppable_over<'a>(
    center: Point,
    dimensions: &'a DimensionMap,
    viewport: &Viewport,
) -> Option<&'a DroppableDimension> {
    dimensions.droppables().find(|d| {
        let center = center - d.window_shift(viewport);
        d.frame.is_some_and(|frame| contains(frame.page.margin_box, center))
    })
}
