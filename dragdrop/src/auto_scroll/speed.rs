use kurbo::{Point, Rect, Vec2};

use crate::geometry::Axis;
use crate::options::AutoScrollOptions;

fn ease(percentage: f64) -> f64 {
    percentage * percentage
}

/// Where `current` sits between `start` and `end`, as a fraction.
fn percentage(start: f64, end: f64, current: f64) -> f64 {
    let range = end - start;
    if range == 0.0 {
        return 0.0;
    }
    (current - start) / range
}

struct Thresholds {
    start_scrolling_from: f64,
    max_scroll_at: f64,
}

impl Thresholds {
    fn new(container: Rect, axis: Axis, options: &AutoScrollOptions) -> Self {
        let size = axis.size(container);
        Self {
            start_scrolling_from: size * options.start_scrolling_from,
            max_scroll_at: size * options.max_scroll_at,
        }
    }
}

fn value_from_distance(
    distance_to_edge: f64,
    thresholds: &Thresholds,
    options: &AutoScrollOptions,
) -> f64 {
    if distance_to_edge > thresholds.start_scrolling_from {
        return 0.0;
    }
    if distance_to_edge <= thresholds.max_scroll_at {
        return options.max_pixel_scroll;
    }
    if distance_to_edge == thresholds.start_scrolling_from {
        return options.min_scroll;
    }
    let from_max = percentage(
        thresholds.max_scroll_at,
        thresholds.start_scrolling_from,
        distance_to_edge,
    );
    (options.max_pixel_scroll * ease(1.0 - from_max)).ceil()
}

fn dampen_by_time(proposed: f64, run_time_ms: u64, options: &AutoScrollOptions) -> f64 {
    let dampening = options.duration_dampening;
    if run_time_ms >= dampening.stop_dampening_at_ms {
        return proposed;
    }
    if run_time_ms < dampening.accelerate_at_ms {
        return options.min_scroll;
    }
    let ratio = percentage(
        dampening.accelerate_at_ms as f64,
        dampening.stop_dampening_at_ms as f64,
        run_time_ms as f64,
    );
    (proposed * ease(ratio)).ceil()
}

/// Time since the drag started and whether speed is damped by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dampening {
    pub run_time_ms: u64,
    pub enabled: bool,
}

fn value(
    distance_to_edge: f64,
    thresholds: &Thresholds,
    dampening: Dampening,
    options: &AutoScrollOptions,
) -> f64 {
    let scroll = value_from_distance(distance_to_edge, thresholds, options);
    if scroll == 0.0 || !dampening.enabled {
        return scroll;
    }
    dampen_by_time(scroll, dampening.run_time_ms, options).max(options.min_scroll)
}

fn on_axis(
    container: Rect,
    center: Point,
    axis: Axis,
    dampening: Dampening,
    options: &AutoScrollOptions,
) -> f64 {
    let thresholds = Thresholds::new(container, axis, options);
    let to_start = axis.of_point(center) - axis.start(container);
    let to_end = axis.end(container) - axis.of_point(center);
    if to_end < to_start {
        value(to_end, &thresholds, dampening, options)
    } else {
        -value(to_start, &thresholds, dampening, options)
    }
}

/// Drops the scroll on any axis where the dragged item is larger than the container;
/// scrolling there would never bring it into view.
fn adjust_for_size_limits(container: Rect, subject: Rect, proposed: Vec2) -> Option<Vec2> {
    let too_wide = subject.width() > container.width();
    let too_tall = subject.height() > container.height();
    match (too_wide, too_tall) {
        (false, false) => Some(proposed),
        (true, true) => None,
        _ => Some(Vec2::new(
            if too_wide { 0.0 } else { proposed.x },
            if too_tall { 0.0 } else { proposed.y },
        )),
    }
}

/// Scroll needed this frame for `center` near the edges of `container`, if any.
///
/// Speed ramps from `min_scroll` at the start threshold up to `max_pixel_scroll` at the
/// max threshold, easing quadratically.
pub fn scroll_speed(
    container: Rect,
    subject: Rect,
    center: Point,
    dampening: Dampening,
    options: &AutoScrollOptions,
) -> Option<Vec2> {
    let required = Vec2::new(
        on_axis(container, center, Axis::Horizontal, dampening, options),
        on_axis(container, center, Axis::Vertical, dampening, options),
    );
    if required == Vec2::ZERO {
        return None;
    }
    adjust_for_size_limits(container, subject, required).filter(|limited| *limited != Vec2::ZERO)
}
