use dragdrop::kurbo::{Point, Rect, Size, Vec2};
use dragdrop::{
    Axis, BoxModel, DraggableDescriptor, DraggableDimension, DraggableId, DropReason,
    DroppableDescriptor, DroppableDimension, DroppableId, DroppableMode, ItemType,
    MoveDirection, MovementMode, Viewport,
};
use dragdrop_adapter::{ControllerError, DragController, Registry, Responders};

/// A static column of rows; nothing scrolls.
struct Rows {
    rows: Vec<DraggableDimension>,
    list: DroppableDimension,
}

impl Registry for Rows {
    fn draggables(&self) -> Vec<DraggableDescriptor> {
        self.rows.iter().map(|r| r.descriptor.clone()).collect()
    }

    fn droppables(&self) -> Vec<DroppableDescriptor> {
        vec![self.list.descriptor.clone()]
    }

    fn draggable_dimension(&mut self, id: &DraggableId, _: Vec2) -> Option<DraggableDimension> {
        self.rows.iter().find(|r| r.id() == id).cloned()
    }

    fn droppable_dimension(&mut self, id: &DroppableId, _: Vec2) -> Option<DroppableDimension> {
        (self.list.id() == id).then(|| self.list.clone())
    }

    fn droppable_scroll(&mut self, _: &DroppableId) -> Option<Vec2> {
        None
    }

    fn viewport(&mut self) -> Viewport {
        Viewport::new(Size::new(800.0, 600.0), Vec2::ZERO, Vec2::ZERO)
    }

    fn scroll_droppable(&mut self, _: &DroppableId, _: Vec2) -> Vec2 {
        Vec2::ZERO
    }

    fn scroll_window(&mut self, _: Vec2) -> Vec2 {
        Vec2::ZERO
    }
}

fn main() -> Result<(), ControllerError> {
    // Example: a keyboard drag driven through the controller.
    //
    // An adapter would:
    // - implement Registry on top of its widget tree
    // - forward key presses as lift / move_in_direction / drop
    // - call tick(now_ms) every frame and render from controller.state()
    let rows = ["first", "second", "third", "fourth"]
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let y0 = i as f64 * 40.0;
            DraggableDimension::new(
                DraggableDescriptor {
                    id: DraggableId::new(*id),
                    index: i,
                    droppable_id: "todo".into(),
                    item_type: ItemType::default(),
                },
                BoxModel::from_border_box(Rect::new(0.0, y0, 300.0, y0 + 40.0)),
                Vec2::ZERO,
            )
        })
        .collect();
    let list = DroppableDimension::new(
        DroppableDescriptor {
            id: "todo".into(),
            item_type: ItemType::default(),
            mode: DroppableMode::Standard,
        },
        Axis::Vertical,
        BoxModel::from_border_box(Rect::new(0.0, 0.0, 300.0, 160.0)),
        Vec2::ZERO,
    );

    let responders = Responders::new()
        .with_on_drag_end(|result, _| {
            println!("end: {:?} -> {:?}", result.source, result.destination)
        })
        .with_announcer(|message| println!("announce: {message}"));
    let mut c = DragController::new(Rows { rows, list }, responders);
    c.subscribe(|state| println!("phase: {}", state.phase()));

    let mut now_ms = 0u64;
    c.lift("first".into(), Point::new(150.0, 20.0), MovementMode::Snap, now_ms)?;
    for _ in 0..2 {
        now_ms += 16;
        c.move_in_direction(MoveDirection::Down, now_ms)?;
        c.tick(now_ms)?;
        if let Some(drag) = c.state().dragging() {
            println!(
                "t={now_ms} over={:?} center={:?}",
                drag.impact.destination(),
                drag.current.client.border_box_center
            );
        }
    }

    now_ms += 16;
    c.drop(DropReason::Drop, now_ms)?;
    while !c.state().is_idle() {
        now_ms += 16;
        c.tick(now_ms)?;
    }
    Ok(())
}
