use kurbo::{Rect, Size, Vec2};

use crate::draggable::DraggableDimension;
use crate::geometry::{Axis, BoxModel, clip};
use crate::types::{DroppableDescriptor, DroppableId, DroppableMode, ItemType};
use crate::viewport::{ScrollDetails, Viewport, max_scroll};

/// Measured scroll container that a droppable lives in, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollContainer {
    pub client: BoxModel,
    /// Full size of the scrollable content.
    pub scroll_size: Size,
    pub scroll: Vec2,
    /// Whether items outside the container's box are hidden.
    pub should_clip_subject: bool,
}

/// A droppable's scroll container while a drag is running.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub client: BoxModel,
    pub page: BoxModel,
    pub scroll_size: Size,
    pub should_clip_subject: bool,
    pub scroll: ScrollDetails,
}

/// Extra room reserved in a foreign list for the dragged item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    pub size: Vec2,
    /// How far the list had to grow to fit the item; `None` when it already had room.
    pub increased_by: Option<Vec2>,
    pub old_frame_max_scroll: Option<Vec2>,
}

/// The part of a droppable that can currently receive a drop.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subject {
    pub page: BoxModel,
    pub placeholder: Option<Placeholder>,
    /// Scrolled, grown and clipped margin box. `None` when clipped out of view.
    pub active: Option<Rect>,
}

impl Subject {
    fn compute(
        page: BoxModel,
        placeholder: Option<Placeholder>,
        axis: Axis,
        frame: Option<&Frame>,
    ) -> Self {
        let displacement = frame.map_or(Vec2::ZERO, |f| f.scroll.diff.displacement);
        let mut target = page.margin_box + displacement;
        if let Some(grow) = placeholder.and_then(|p| p.increased_by) {
            target = match axis {
                Axis::Vertical => Rect::new(target.x0, target.y0, target.x1, target.y1 + grow.y),
                Axis::Horizontal => Rect::new(target.x0, target.y0, target.x1 + grow.x, target.y1),
            };
        }
        let active = match frame {
            Some(frame) if frame.should_clip_subject => clip(frame.page.margin_box, target),
            _ => Some(target),
        };
        Self {
            page,
            placeholder,
            active,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DroppableDimension {
    pub descriptor: DroppableDescriptor,
    pub axis: Axis,
    pub is_enabled: bool,
    pub is_combine_enabled: bool,
    /// Fixed-position lists stay put on screen, so their page box follows the window scroll.
    pub is_fixed_on_page: bool,
    pub client: BoxModel,
    pub page: BoxModel,
    pub frame: Option<Frame>,
    pub subject: Subject,
}

impl DroppableDimension {
    pub fn new(
        descriptor: DroppableDescriptor,
        axis: Axis,
        client: BoxModel,
        window_scroll: Vec2,
    ) -> Self {
        let page = client.offset(window_scroll);
        Self {
            descriptor,
            axis,
            is_enabled: true,
            is_combine_enabled: false,
            is_fixed_on_page: false,
            client,
            page,
            frame: None,
            subject: Subject::compute(page, None, axis, None),
        }
    }

    /// Attaches the closest scroll container. `window_scroll` must match the one given to `new`.
    pub fn with_scroll_container(
        mut self,
        container: ScrollContainer,
        window_scroll: Vec2,
    ) -> Self {
        let frame = Frame {
            client: container.client,
            page: container.client.offset(window_scroll),
            scroll_size: container.scroll_size,
            should_clip_subject: container.should_clip_subject,
            scroll: ScrollDetails::new(
                container.scroll,
                max_scroll(container.scroll_size, container.client.padding_box.size()),
            ),
        };
        self.frame = Some(frame);
        self.refresh_subject();
        self
    }

    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn with_combine_enabled(mut self, is_combine_enabled: bool) -> Self {
        self.is_combine_enabled = is_combine_enabled;
        self
    }

    pub fn with_fixed_on_page(mut self, is_fixed_on_page: bool) -> Self {
        self.is_fixed_on_page = is_fixed_on_page;
        self
    }

    pub fn id(&self) -> &DroppableId {
        &self.descriptor.id
    }

    pub fn item_type(&self) -> &ItemType {
        &self.descriptor.item_type
    }

    pub fn is_virtual(&self) -> bool {
        self.descriptor.mode == DroppableMode::Virtual
    }

    /// Scroll movement of the frame since lift, or zero without a frame.
    pub fn scroll_diff(&self) -> Vec2 {
        self.frame.map_or(Vec2::ZERO, |f| f.scroll.diff.value)
    }

    pub fn scroll_displacement(&self) -> Vec2 {
        self.frame.map_or(Vec2::ZERO, |f| f.scroll.diff.displacement)
    }

    /// How far a fixed list has travelled in page space since lift; zero otherwise.
    ///
    /// Geometry is captured once, so a fixed list keeps its lift-time page boxes and callers
    /// shift by this amount when comparing against live page positions.
    pub fn window_shift(&self, viewport: &Viewport) -> Vec2 {
        if self.is_fixed_on_page {
            viewport.scroll.diff.value
        } else {
            Vec2::ZERO
        }
    }

    fn refresh_subject(&mut self) {
        self.subject = Subject::compute(
            self.page,
            self.subject.placeholder,
            self.axis,
            self.frame.as_ref(),
        );
    }

    /// The droppable with its frame scrolled to `new_scroll`. No-op without a frame.
    pub fn scrolled_to(&self, new_scroll: Vec2) -> Self {
        let mut next = self.clone();
        if let Some(frame) = next.frame.as_mut() {
            frame.scroll = frame.scroll.scrolled_to(new_scroll);
            next.refresh_subject();
        }
        next
    }

    /// Reserves room for `draggable` at the end of this list, growing the frame's max scroll
    /// when the content would no longer fit.
    ///
    /// `inside` holds the draggables currently in this list.
    pub fn with_placeholder(
        &self,
        draggable: &DraggableDimension,
        inside: &[&DraggableDimension],
    ) -> Self {
        let axis = self.axis;
        let size = axis.vec(axis.of_vec(draggable.displace_by));
        let increased_by = if self.is_virtual() {
            Some(size)
        } else {
            let available = axis.size(self.subject.page.content_box);
            let used: f64 = inside.iter().map(|d| axis.size(d.client.margin_box)).sum();
            let grow = used + axis.of_vec(size) - available;
            (grow > 0.0).then(|| axis.vec(grow))
        };
        let mut next = self.clone();
        let old_frame_max_scroll = self.frame.map(|f| f.scroll.max);
        if let (Some(frame), Some(grow)) = (next.frame.as_mut(), increased_by) {
            frame.scroll.max += grow;
        }
        next.subject.placeholder = Some(Placeholder {
            size,
            increased_by,
            old_frame_max_scroll,
        });
        next.refresh_subject();
        next
    }

    pub fn without_placeholder(&self) -> Self {
        let mut next = self.clone();
        let Some(placeholder) = next.subject.placeholder.take() else {
            return next;
        };
        if let (Some(frame), Some(max)) = (next.frame.as_mut(), placeholder.old_frame_max_scroll) {
            frame.scroll.max = max;
        }
        next.refresh_subject();
        next
    }
}
