use dragdrop::kurbo::Vec2;
use dragdrop::{
    DraggableDescriptor, DraggableDimension, DraggableId, DroppableDescriptor,
    DroppableDimension, DroppableId, Viewport,
};

/// The view layer as seen by [`DragController`](crate::DragController).
///
/// A registry knows every mounted draggable and droppable, measures them on request and
/// performs scrolls. All methods are synchronous; measurements are only requested for
/// participants the registry currently lists.
pub trait Registry {
    /// Every mounted draggable.
    fn draggables(&self) -> Vec<DraggableDescriptor>;

    /// Every mounted droppable.
    fn droppables(&self) -> Vec<DroppableDescriptor>;

    /// Measures a draggable. `window_scroll` is the scroll the client boxes were read at.
    fn draggable_dimension(
        &mut self,
        id: &DraggableId,
        window_scroll: Vec2,
    ) -> Option<DraggableDimension>;

    /// Measures a droppable, including its scroll container if it has one.
    fn droppable_dimension(
        &mut self,
        id: &DroppableId,
        window_scroll: Vec2,
    ) -> Option<DroppableDimension>;

    /// Current scroll offset of a droppable's container.
    fn droppable_scroll(&mut self, id: &DroppableId) -> Option<Vec2>;

    fn viewport(&mut self) -> Viewport;

    /// Scrolls a droppable's container by `change` and returns the offset it ended up at.
    fn scroll_droppable(&mut self, id: &DroppableId, change: Vec2) -> Vec2;

    /// Scrolls the window by `change` and returns the offset it ended up at.
    fn scroll_window(&mut self, change: Vec2) -> Vec2;

    /// Starts forwarding user scrolls of `id` to the controller.
    fn watch_scroll(&mut self, _id: &DroppableId) {}

    fn unwatch_scroll(&mut self, _id: &DroppableId) {}

    /// Whether the engine may scroll the window on its own. A drag over any list that is fixed
    /// on the page never scrolls the window, whatever this returns.
    fn is_window_scroll_allowed(&self) -> bool {
        true
    }
}
