// Example: drag the second of four rows past the third with a pointer, then drop.
use dragdrop::kurbo::{Point, Rect, Size, Vec2};
use dragdrop::{
    Action, Axis, BoxModel, Critical, DimensionMap, DragState, DraggableDescriptor,
    DraggableDimension, DraggableId, DropReason, DroppableDescriptor, DroppableDimension,
    DroppableMode, InitialPublish, ItemType, MovementMode, Viewport, transition,
};

fn row(id: &str, index: usize) -> DraggableDimension {
    let y0 = index as f64 * 50.0;
    DraggableDimension::new(
        DraggableDescriptor {
            id: DraggableId::new(id),
            index,
            droppable_id: "list".into(),
            item_type: ItemType::default(),
        },
        BoxModel::from_border_box(Rect::new(0.0, y0, 200.0, y0 + 50.0)),
        Vec2::ZERO,
    )
}

fn main() -> Result<(), dragdrop::TransitionError> {
    let list = DroppableDimension::new(
        DroppableDescriptor {
            id: "list".into(),
            item_type: ItemType::default(),
            mode: DroppableMode::Standard,
        },
        Axis::Vertical,
        BoxModel::from_border_box(Rect::new(0.0, 0.0, 200.0, 200.0)),
        Vec2::ZERO,
    );
    let rows: Vec<_> = ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, id)| row(id, i))
        .collect();
    let critical = Critical {
        draggable: rows[1].descriptor.clone(),
        droppable: list.descriptor.clone(),
    };
    let dimensions = DimensionMap::new(rows, [list]);

    let state = transition(
        &DragState::default(),
        Action::Lift {
            draggable_id: "B".into(),
            client_selection: Point::new(100.0, 75.0),
            movement_mode: MovementMode::Fluid,
        },
    )?;
    let mut state = transition(
        &state,
        Action::InitialPublish(InitialPublish {
            critical,
            dimensions,
            viewport: Viewport::new(Size::new(800.0, 600.0), Vec2::ZERO, Vec2::ZERO),
            is_window_scroll_allowed: true,
        }),
    )?;

    for y in [90.0, 130.0, 150.0] {
        state = transition(
            &state,
            Action::Move {
                client: Point::new(100.0, y),
            },
        )?;
        if let Some(drag) = state.dragging() {
            let displaced: Vec<_> = drag.impact.movement.ids().map(|id| id.as_str()).collect();
            println!(
                "pointer y={y}: destination={:?} displaced={displaced:?}",
                drag.impact.destination().map(|d| d.index)
            );
        }
    }

    let state = transition(
        &state,
        Action::Drop {
            reason: DropReason::Drop,
        },
    )?;
    if let DragState::DropAnimating(pending) = &state {
        println!(
            "settling by {:?} over {}ms",
            pending.new_home_client_offset, pending.drop_duration_ms
        );
    }
    let state = transition(&state, Action::DropAnimationFinished)?;
    if let Some(completed) = state.completed() {
        println!("result: {:?}", completed.result);
    }
    Ok(())
}
