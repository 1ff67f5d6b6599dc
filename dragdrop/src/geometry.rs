use kurbo::{Insets, Point, Rect, Vec2};

/// Main axis of a droppable list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }

    pub const fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    pub fn of_point(self, p: Point) -> f64 {
        match self {
            Self::Vertical => p.y,
            Self::Horizontal => p.x,
        }
    }

    pub fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    pub fn start(self, r: Rect) -> f64 {
        match self {
            Self::Vertical => r.y0,
            Self::Horizontal => r.x0,
        }
    }

    pub fn end(self, r: Rect) -> f64 {
        match self {
            Self::Vertical => r.y1,
            Self::Horizontal => r.x1,
        }
    }

    pub fn size(self, r: Rect) -> f64 {
        self.end(r) - self.start(r)
    }

    pub fn margin_start(self, m: Insets) -> f64 {
        match self {
            Self::Vertical => m.y0,
            Self::Horizontal => m.x0,
        }
    }

    pub fn margin_end(self, m: Insets) -> f64 {
        match self {
            Self::Vertical => m.y1,
            Self::Horizontal => m.x1,
        }
    }

    /// A vector with `value` on this axis and zero on the other.
    pub fn vec(self, value: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(0.0, value),
            Self::Horizontal => Vec2::new(value, 0.0),
        }
    }

    /// A point from main-axis and cross-axis coordinates.
    pub fn point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point::new(cross, main),
            Self::Horizontal => Point::new(main, cross),
        }
    }

    /// Replaces this axis' component of `v`.
    pub fn patch(self, v: Vec2, value: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(v.x, value),
            Self::Horizontal => Vec2::new(value, v.y),
        }
    }
}

/// The nested boxes of one laid-out element.
///
/// `border_box` is the anchor; the others are derived from the spacing insets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxModel {
    pub margin_box: Rect,
    pub border_box: Rect,
    pub padding_box: Rect,
    pub content_box: Rect,
    pub margin: Insets,
    pub border: Insets,
    pub padding: Insets,
}

impl BoxModel {
    pub fn new(border_box: Rect, margin: Insets, border: Insets, padding: Insets) -> Self {
        let padding_box = border_box - border;
        Self {
            margin_box: border_box + margin,
            border_box,
            padding_box,
            content_box: padding_box - padding,
            margin,
            border,
            padding,
        }
    }

    /// A box without margin, border or padding.
    pub fn from_border_box(border_box: Rect) -> Self {
        Self::new(border_box, Insets::ZERO, Insets::ZERO, Insets::ZERO)
    }

    pub fn with_margin(self, margin: Insets) -> Self {
        Self::new(self.border_box, margin, self.border, self.padding)
    }

    pub fn with_padding(self, padding: Insets) -> Self {
        Self::new(self.border_box, self.margin, self.border, padding)
    }

    pub fn offset(&self, by: Vec2) -> Self {
        Self {
            margin_box: self.margin_box + by,
            border_box: self.border_box + by,
            padding_box: self.padding_box + by,
            content_box: self.content_box + by,
            ..*self
        }
    }
}

/// Inclusive containment, so an item sitting on an edge still counts.
pub fn contains(frame: Rect, p: Point) -> bool {
    p.x >= frame.x0 && p.x <= frame.x1 && p.y >= frame.y0 && p.y <= frame.y1
}

/// Whether any part of `target` can be seen through `frame`.
pub fn is_partially_within(frame: Rect, target: Rect) -> bool {
    target.x0 <= frame.x1 && target.x1 >= frame.x0 && target.y0 <= frame.y1 && target.y1 >= frame.y0
}

pub fn is_totally_within(frame: Rect, target: Rect) -> bool {
    target.x0 >= frame.x0 && target.x1 <= frame.x1 && target.y0 >= frame.y0 && target.y1 <= frame.y1
}

/// Containment along `axis` only.
pub fn is_totally_within_on_axis(axis: Axis, frame: Rect, target: Rect) -> bool {
    axis.start(target) >= axis.start(frame) && axis.end(target) <= axis.end(frame)
}

/// The overlap of two rects, or `None` when they share no area.
pub fn clip(frame: Rect, target: Rect) -> Option<Rect> {
    let clipped = Rect::new(
        frame.x0.max(target.x0),
        frame.y0.max(target.y0),
        frame.x1.min(target.x1),
        frame.y1.min(target.y1),
    );
    if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
        return None;
    }
    Some(clipped)
}

pub(crate) fn rect_union(a: Rect, b: Rect) -> Rect {
    Rect::new(a.x0.min(b.x0), a.y0.min(b.y0), a.x1.max(b.x1), a.y1.max(b.y1))
}
