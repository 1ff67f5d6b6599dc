use kurbo::{Rect, Size, Vec2};

/// Change in scroll since the drag started.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollDiff {
    /// `current - initial`.
    pub value: Vec2,
    /// How far content appears to have moved: the negation of `value`.
    pub displacement: Vec2,
}

/// Scroll state of the window or of a scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollDetails {
    pub initial: Vec2,
    pub current: Vec2,
    pub max: Vec2,
    pub diff: ScrollDiff,
}

impl ScrollDetails {
    pub fn new(initial: Vec2, max: Vec2) -> Self {
        Self {
            initial,
            current: initial,
            max,
            diff: ScrollDiff::default(),
        }
    }

    pub fn scrolled_to(&self, current: Vec2) -> Self {
        let value = current - self.initial;
        Self {
            current,
            diff: ScrollDiff {
                value,
                displacement: -value,
            },
            ..*self
        }
    }

    pub fn with_max(&self, max: Vec2) -> Self {
        Self { max, ..*self }
    }
}

/// Largest scroll offset for a container of `client` size showing `scroll_size` of content.
pub fn max_scroll(scroll_size: Size, client: Size) -> Vec2 {
    Vec2::new(
        (scroll_size.width - client.width).max(0.0),
        (scroll_size.height - client.height).max(0.0),
    )
}

/// The visible part of the page.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Page coordinates of the visible region; moves with the window scroll.
    pub frame: Rect,
    pub scroll: ScrollDetails,
}

impl Viewport {
    pub fn new(size: Size, scroll: Vec2, max_scroll: Vec2) -> Self {
        Self {
            frame: Rect::from_origin_size(scroll.to_point(), size),
            scroll: ScrollDetails::new(scroll, max_scroll),
        }
    }

    pub fn size(&self) -> Size {
        self.frame.size()
    }

    pub fn scrolled_to(&self, scroll: Vec2) -> Self {
        Self {
            frame: Rect::from_origin_size(scroll.to_point(), self.frame.size()),
            scroll: self.scroll.scrolled_to(scroll),
        }
    }

    pub fn with_max_scroll(&self, max: Vec2) -> Self {
        Self {
            frame: self.frame,
            scroll: self.scroll.with_max(max),
        }
    }
}
