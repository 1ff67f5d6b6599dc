use kurbo::{Point, Vec2};

use crate::geometry::BoxModel;
use crate::types::{DraggableDescriptor, DraggableId, DroppableId};

/// Measured geometry of one draggable, captured when the drag starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DraggableDimension {
    pub descriptor: DraggableDescriptor,
    /// Relative to the viewport.
    pub client: BoxModel,
    /// Relative to the page, i.e. `client` plus the window scroll at capture time.
    pub page: BoxModel,
    /// How far siblings move to make room for this item: its margin-box size.
    pub displace_by: Vec2,
}

impl DraggableDimension {
    pub fn new(descriptor: DraggableDescriptor, client: BoxModel, window_scroll: Vec2) -> Self {
        let margin_box = client.margin_box;
        Self {
            descriptor,
            page: client.offset(window_scroll),
            client,
            displace_by: Vec2::new(margin_box.width(), margin_box.height()),
        }
    }

    pub fn id(&self) -> &DraggableId {
        &self.descriptor.id
    }

    pub fn index(&self) -> usize {
        self.descriptor.index
    }

    pub fn droppable_id(&self) -> &DroppableId {
        &self.descriptor.droppable_id
    }

    pub fn page_center(&self) -> Point {
        self.page.border_box.center()
    }

    /// Shifts a dimension that was measured while the window and its list were scrolled.
    ///
    /// `offset` is applied to the client boxes; page boxes are rebuilt from `window_scroll`.
    pub(crate) fn offset_by(&self, offset: Vec2, window_scroll: Vec2) -> Self {
        let client = self.client.offset(offset);
        Self {
            descriptor: self.descriptor.clone(),
            page: client.offset(window_scroll),
            client,
            displace_by: self.displace_by,
        }
    }
}
