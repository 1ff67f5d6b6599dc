/// Time-based damping of fluid auto-scroll right after a drag starts.
///
/// Keeps a list from racing away when an item is lifted close to an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationDampening {
    /// Before this, scrolling is held at the minimum speed.
    pub accelerate_at_ms: u64,
    /// After this, no damping is applied.
    pub stop_dampening_at_ms: u64,
}

impl Default for DurationDampening {
    fn default() -> Self {
        Self {
            accelerate_at_ms: 360,
            stop_dampening_at_ms: 1200,
        }
    }
}

/// Configuration for the fluid and jump auto-scrollers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoScrollOptions {
    /// Distance from an edge, as a fraction of the container size, where scrolling begins.
    pub start_scrolling_from: f64,
    /// Distance from an edge, as a fraction of the container size, where speed peaks.
    pub max_scroll_at: f64,
    /// Peak speed in pixels per frame.
    pub max_pixel_scroll: f64,
    pub min_scroll: f64,
    pub duration_dampening: DurationDampening,
    pub disabled: bool,
}

impl Default for AutoScrollOptions {
    fn default() -> Self {
        Self {
            start_scrolling_from: 0.25,
            max_scroll_at: 0.05,
            max_pixel_scroll: 28.0,
            min_scroll: 1.0,
            duration_dampening: DurationDampening::default(),
            disabled: false,
        }
    }
}

impl AutoScrollOptions {
    pub fn with_thresholds(mut self, start_scrolling_from: f64, max_scroll_at: f64) -> Self {
        self.start_scrolling_from = start_scrolling_from;
        self.max_scroll_at = max_scroll_at;
        self
    }

    pub fn with_max_pixel_scroll(mut self, max_pixel_scroll: f64) -> Self {
        self.max_pixel_scroll = max_pixel_scroll;
        self
    }

    pub fn with_duration_dampening(mut self, duration_dampening: DurationDampening) -> Self {
        self.duration_dampening = duration_dampening;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Timing of the settle animation after a drop.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropAnimationOptions {
    pub min_duration_ms: u64,
    pub max_duration_ms: u64,
    /// Travel distance at which `max_duration_ms` is reached.
    pub max_duration_at_distance: f64,
    /// Cancelled drops return home faster.
    pub cancel_modifier: f64,
}

impl Default for DropAnimationOptions {
    fn default() -> Self {
        Self {
            min_duration_ms: 330,
            max_duration_ms: 550,
            max_duration_at_distance: 1500.0,
            cancel_modifier: 0.6,
        }
    }
}

/// Engine configuration.
///
/// `Default` gives the standard behaviour; adjust with the `with_*` builders.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragOptions {
    pub auto_scroll: AutoScrollOptions,
    pub drop_animation: DropAnimationOptions,
    /// The combine band excludes `size / divisor` from each end of a target.
    pub combine_threshold_divisor: f64,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            auto_scroll: AutoScrollOptions::default(),
            drop_animation: DropAnimationOptions::default(),
            combine_threshold_divisor: 4.0,
        }
    }
}

impl DragOptions {
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollOptions) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }

    pub fn with_drop_animation(mut self, drop_animation: DropAnimationOptions) -> Self {
        self.drop_animation = drop_animation;
        self
    }

    pub fn with_combine_threshold_divisor(mut self, divisor: f64) -> Self {
        debug_assert!(divisor > 2.0, "combine band must be non-empty");
        self.combine_threshold_divisor = divisor;
        self
    }
}
