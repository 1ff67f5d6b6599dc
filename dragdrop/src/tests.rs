use crate::*;

use kurbo::{Point, Rect, Size, Vec2};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn item(id: &str, index: usize, droppable: &str, rect: Rect) -> DraggableDimension {
    DraggableDimension::new(
        DraggableDescriptor {
            id: DraggableId::new(id),
            index,
            droppable_id: DroppableId::new(droppable),
            item_type: ItemType::default(),
        },
        BoxModel::from_border_box(rect),
        Vec2::ZERO,
    )
}

fn list(id: &str, axis: Axis, rect: Rect) -> DroppableDimension {
    DroppableDimension::new(
        DroppableDescriptor {
            id: DroppableId::new(id),
            item_type: ItemType::default(),
            mode: DroppableMode::Standard,
        },
        axis,
        BoxModel::from_border_box(rect),
        Vec2::ZERO,
    )
}

/// Items of `size` stacked from y = 0 in a 200px wide column starting at `x0`.
fn column(droppable: &str, ids: &[&str], x0: f64, size: f64) -> Vec<DraggableDimension> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let y0 = i as f64 * size;
            item(id, i, droppable, Rect::new(x0, y0, x0 + 200.0, y0 + size))
        })
        .collect()
}

fn abcd() -> DimensionMap {
    DimensionMap::new(
        column("list", &["A", "B", "C", "D"], 0.0, 50.0),
        [list("list", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 200.0))],
    )
}

/// `abcd` in a list pinned to the screen.
fn fixed_abcd() -> DimensionMap {
    let fixed =
        list("list", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 200.0)).with_fixed_on_page(true);
    DimensionMap::new(column("list", &["A", "B", "C", "D"], 0.0, 50.0), [fixed])
}

/// `abcd` next to a second column holding X and Y.
fn two_columns() -> DimensionMap {
    let mut draggables = column("left", &["A", "B", "C", "D"], 0.0, 50.0);
    draggables.extend(column("right", &["X", "Y"], 300.0, 50.0));
    DimensionMap::new(
        draggables,
        [
            list("left", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 200.0)),
            list("right", Axis::Vertical, Rect::new(300.0, 0.0, 500.0, 200.0)),
        ],
    )
}

/// `abcd` inside a 100px tall scroll container.
fn scrolling_abcd() -> DimensionMap {
    let scrollable = list("list", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 200.0))
        .with_scroll_container(
            ScrollContainer {
                client: BoxModel::from_border_box(Rect::new(0.0, 0.0, 200.0, 100.0)),
                scroll_size: Size::new(200.0, 200.0),
                scroll: Vec2::ZERO,
                should_clip_subject: true,
            },
            Vec2::ZERO,
        );
    DimensionMap::new(column("list", &["A", "B", "C", "D"], 0.0, 50.0), [scrollable])
}

fn viewport() -> Viewport {
    Viewport::new(Size::new(1000.0, 1000.0), Vec2::ZERO, Vec2::ZERO)
}

fn critical_for(dimensions: &DimensionMap, id: &str) -> Critical {
    let draggable = dimensions.draggable(&DraggableId::new(id)).unwrap();
    let home = dimensions.droppable(draggable.droppable_id()).unwrap();
    Critical {
        draggable: draggable.descriptor.clone(),
        droppable: home.descriptor.clone(),
    }
}

fn start(dimensions: DimensionMap, id: &str, movement_mode: MovementMode) -> DragState {
    start_with(dimensions, id, movement_mode, true)
}

fn start_with(
    dimensions: DimensionMap,
    id: &str,
    movement_mode: MovementMode,
    is_window_scroll_allowed: bool,
) -> DragState {
    let draggable_id = DraggableId::new(id);
    let center = dimensions
        .draggable(&draggable_id)
        .unwrap()
        .client
        .border_box
        .center();
    let preparing = transition(
        &DragState::default(),
        Action::Lift {
            draggable_id,
            client_selection: center,
            movement_mode,
        },
    )
    .unwrap();
    transition(
        &preparing,
        Action::InitialPublish(InitialPublish {
            critical: critical_for(&dimensions, id),
            dimensions,
            viewport: viewport(),
            is_window_scroll_allowed,
        }),
    )
    .unwrap()
}

/// Lets the window scroll down to 500.
fn with_scrollable_window(state: &DragState) -> DragState {
    let mut d = drag(state).clone();
    d.viewport = d.viewport.with_max_scroll(Vec2::new(0.0, 500.0));
    DragState::Dragging(d)
}

fn scroll_window(state: &DragState, y: f64) -> DragState {
    transition(
        state,
        Action::MoveByWindowScroll {
            new_scroll: Vec2::new(0.0, y),
        },
    )
    .unwrap()
}

fn move_to(state: &DragState, x: f64, y: f64) -> DragState {
    transition(
        state,
        Action::Move {
            client: Point::new(x, y),
        },
    )
    .unwrap()
}

fn step(state: &DragState, direction: MoveDirection) -> DragState {
    transition(state, Action::MoveInDirection(direction)).unwrap()
}

fn drag(state: &DragState) -> &DraggingState {
    state.dragging().expect("drag in progress")
}

fn displaced(impact: &DragImpact) -> Vec<&str> {
    impact.movement.ids().map(DraggableId::as_str).collect()
}

fn destination(impact: &DragImpact) -> Option<(&str, usize)> {
    impact
        .destination()
        .map(|d| (d.droppable_id.as_str(), d.index))
}

#[test]
fn displace_moves_the_range_between_slots() {
    let siblings = ["A", "C", "D"];
    let forward = displace(&siblings, 1, 3, 50.0);
    assert_eq!(forward.shifted, &["C", "D"]);
    assert_eq!(forward.first_index, 1);
    assert_eq!(forward.offset, -50.0);

    let backward = displace(&siblings, 3, 1, 50.0);
    assert_eq!(backward.shifted, &["C", "D"]);
    assert_eq!(backward.offset, 50.0);

    let none = displace(&siblings, 2, 2, 50.0);
    assert!(none.shifted.is_empty());
    assert_eq!(none.offset, 0.0);

    // Out of range slots clamp to the end.
    assert_eq!(displace(&siblings, 9, 0, 10.0).shifted, &siblings[..]);
}

#[test]
fn displace_is_idempotent() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let len = rng.gen_range_usize(0, 12);
        let siblings: Vec<usize> = (0..len).collect();
        let from = rng.gen_range_usize(0, len + 1);
        let to = rng.gen_range_usize(0, len + 1);
        let size = rng.gen_range_u64(1, 200) as f64;
        assert_eq!(
            displace(&siblings, from, to, size),
            displace(&siblings, from, to, size)
        );
    }
}

#[test]
fn lift_starts_at_home_with_nothing_displaced() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    assert_eq!(state.phase(), Phase::Dragging);
    let d = drag(&state);
    assert_eq!(destination(&d.impact), Some(("list", 1)));
    assert!(d.impact.movement.displaced.is_empty());
    assert_eq!(d.after_critical.effected.len(), 2);
    assert!(!d.after_critical.in_virtual_list);
}

#[test]
fn pointer_at_center_of_last_item_moves_past_it() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let state = move_to(&state, 100.0, 175.0);
    let d = drag(&state);
    // Reaching a center counts as passing it, so D moves too. A reading of this case that
    // leaves D in place would contradict the boundary rule used everywhere else.
    assert_eq!(destination(&d.impact), Some(("list", 3)));
    assert_eq!(displaced(&d.impact), ["C", "D"]);
    assert_eq!(d.impact.movement.displaced_by.value, -50.0);
    assert!(d.impact.movement.displaced.iter().all(|m| m.should_animate));
}

#[test]
fn pointer_between_centers_displaces_only_the_passed_item() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let state = move_to(&state, 100.0, 150.0);
    let d = drag(&state);
    assert_eq!(destination(&d.impact), Some(("list", 2)));
    assert_eq!(displaced(&d.impact), ["C"]);
    assert!(d.impact.movement.displaced[0].should_animate);
    assert!(d.impact.movement.displaced[0].is_visible);
}

#[test]
fn moving_backwards_pushes_items_forward() {
    let state = start(abcd(), "D", MovementMode::Fluid);
    let state = move_to(&state, 100.0, 20.0);
    let d = drag(&state);
    assert_eq!(destination(&d.impact), Some(("list", 0)));
    assert_eq!(displaced(&d.impact), ["A", "B", "C"]);
    assert_eq!(d.impact.movement.displaced_by.value, 50.0);
}

#[test]
fn pointer_at_center_of_combine_target_combines() {
    let dims = abcd();
    let id = DroppableId::new("list");
    let combining = dims.droppable(&id).unwrap().clone().with_combine_enabled(true);
    let state = start(dims.with_droppable(combining), "B", MovementMode::Fluid);
    let state = move_to(&state, 100.0, 125.0);
    let d = drag(&state);
    let combine = d.impact.combine().expect("combine");
    assert_eq!(combine.draggable_id.as_str(), "C");
    assert_eq!(combine.droppable_id.as_str(), "list");
    assert!(d.impact.destination().is_none());
    assert!(d.impact.movement.displaced.is_empty());
}

#[test]
fn combine_band_excludes_item_edges() {
    let dims = abcd();
    let id = DroppableId::new("list");
    let combining = dims.droppable(&id).unwrap().clone().with_combine_enabled(true);
    let state = start(dims.with_droppable(combining), "B", MovementMode::Fluid);
    // 5px into C: outside the central band, so this is a reorder.
    let state = move_to(&state, 100.0, 105.0);
    let d = drag(&state);
    assert!(d.impact.combine().is_none());
    assert_eq!(destination(&d.impact), Some(("list", 1)));
}

#[test]
fn unchanged_target_does_not_restart_animations() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let first = move_to(&state, 100.0, 150.0);
    let second = move_to(&first, 100.0, 152.0);
    assert_eq!(drag(&first).impact, drag(&second).impact);
}

#[test]
fn previously_displaced_items_keep_their_animation_flag() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let first = move_to(&state, 100.0, 150.0);
    let mut d = drag(&first).clone();
    d.impact.movement.displaced[0].should_animate = false;
    let patched = DragState::Dragging(d);
    let second = move_to(&patched, 100.0, 176.0);
    let movement = &drag(&second).impact.movement;
    assert_eq!(displaced(&drag(&second).impact), ["C", "D"]);
    assert!(!movement.displaced[0].should_animate, "C was already moving");
    assert!(movement.displaced[1].should_animate, "D starts moving now");
}

#[test]
fn displacement_is_ordered_and_excludes_the_dragged_item() {
    let mut rng = Lcg::new(42);
    for _ in 0..300 {
        let len = rng.gen_range_usize(1, 9);
        let mut draggables = Vec::new();
        let mut y = 0.0;
        for i in 0..len {
            let size = rng.gen_range_u64(20, 80) as f64;
            let rect = Rect::new(0.0, y, 200.0, y + size);
            draggables.push(item(&format!("item-{i}"), i, "list", rect));
            y += size;
        }
        let combine = rng.gen_bool();
        let droppable = list("list", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, y))
            .with_combine_enabled(combine);
        let dims = DimensionMap::new(draggables, [droppable]);
        let lifted = format!("item-{}", rng.gen_range_usize(0, len));
        let mut state = start(dims, &lifted, MovementMode::Fluid);
        for _ in 0..5 {
            let pointer = rng.gen_range_u64(0, y as u64 + 40) as f64 - 20.0;
            state = move_to(&state, 100.0, pointer);
            let d = drag(&state);
            let indices: Vec<usize> = d
                .impact
                .movement
                .ids()
                .map(|id| d.dimensions.draggable(id).unwrap().index())
                .collect();
            assert!(indices.windows(2).all(|w| w[0] < w[1]), "{indices:?}");
            assert!(!d.impact.movement.is_displaced(&DraggableId::new(lifted.as_str())));
            assert!(d.impact.destination().is_none() || d.impact.combine().is_none());
        }
    }
}

#[test]
fn leaving_every_list_clears_the_impact() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let state = move_to(&state, 700.0, 75.0);
    let d = drag(&state);
    assert!(d.impact.at.is_none());
    assert!(d.impact.movement.displaced.is_empty());
}

#[test]
fn disabled_list_is_not_a_destination() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let state = transition(
        &state,
        Action::UpdateDroppableIsEnabled {
            id: DroppableId::new("list"),
            is_enabled: false,
        },
    )
    .unwrap();
    assert!(drag(&state).impact.at.is_none());
}

#[test]
fn empty_list_always_resolves_to_index_zero() {
    let empty = list("empty", Axis::Vertical, Rect::new(300.0, 0.0, 500.0, 400.0));
    let dims = abcd().with_droppable(empty);
    let state = start(dims, "B", MovementMode::Fluid);
    let state = move_to(&state, 400.0, 300.0);
    assert_eq!(destination(&drag(&state).impact), Some(("empty", 0)));
}

#[test]
fn foreign_list_gets_placeholder_space_while_over_it() {
    let state = start(two_columns(), "A", MovementMode::Fluid);
    let state = move_to(&state, 400.0, 60.0);
    let d = drag(&state);
    assert_eq!(destination(&d.impact), Some(("right", 1)));
    assert_eq!(displaced(&d.impact), ["Y"]);
    assert_eq!(d.impact.movement.displaced_by.value, 50.0);
    let right = d.dimensions.droppable(&DroppableId::new("right")).unwrap();
    assert!(right.subject.placeholder.is_some());

    let back = move_to(&state, 100.0, 25.0);
    let d = drag(&back);
    assert_eq!(destination(&d.impact), Some(("left", 0)));
    let right = d.dimensions.droppable(&DroppableId::new("right")).unwrap();
    assert!(right.subject.placeholder.is_none());
}

#[test]
fn clipped_subject_hides_items_outside_the_frame() {
    let state = start(scrolling_abcd(), "A", MovementMode::Fluid);
    // D sits below the 100px frame: outside the visible subject.
    let state = move_to(&state, 100.0, 175.0);
    assert!(drag(&state).impact.at.is_none());
}

#[test]
fn virtual_list_starts_with_later_siblings_displaced() {
    let mut dims = abcd();
    let id = DroppableId::new("list");
    let mut virtual_list = dims.droppable(&id).unwrap().clone();
    virtual_list.descriptor.mode = DroppableMode::Virtual;
    dims = dims.with_droppable(virtual_list);

    let state = start(dims, "B", MovementMode::Fluid);
    let d = drag(&state);
    assert!(d.after_critical.in_virtual_list);
    assert_eq!(destination(&d.impact), Some(("list", 1)));
    assert_eq!(displaced(&d.impact), ["C", "D"]);
    assert!(d.impact.movement.displaced.iter().all(|m| !m.should_animate));

    let nudged = move_to(&state, 100.0, 76.0);
    assert_eq!(drag(&nudged).impact, d.impact);
}

#[test]
fn keyboard_steps_through_slots() {
    let state = start(abcd(), "B", MovementMode::Snap);
    let down = step(&state, MoveDirection::Down);
    let d = drag(&down);
    assert_eq!(destination(&d.impact), Some(("list", 2)));
    assert_eq!(displaced(&d.impact), ["C"]);
    assert_eq!(d.current.client.border_box_center, Point::new(100.0, 125.0));
    assert!(d.scroll_jump_request.is_none());

    let last = step(&down, MoveDirection::Down);
    assert_eq!(destination(&drag(&last).impact), Some(("list", 3)));
    let past_end = step(&last, MoveDirection::Down);
    assert_eq!(drag(&past_end).impact, drag(&last).impact);

    let mut up = past_end;
    for _ in 0..4 {
        up = step(&up, MoveDirection::Up);
    }
    let d = drag(&up);
    assert_eq!(destination(&d.impact), Some(("list", 0)));
    assert_eq!(displaced(&d.impact), ["A"]);
    assert_eq!(d.current.client.border_box_center, Point::new(100.0, 25.0));
}

#[test]
fn keyboard_combines_before_passing_a_neighbour() {
    let dims = abcd();
    let id = DroppableId::new("list");
    let combining = dims.droppable(&id).unwrap().clone().with_combine_enabled(true);
    let state = start(dims.with_droppable(combining), "B", MovementMode::Snap);

    let over_c = step(&state, MoveDirection::Down);
    assert_eq!(
        drag(&over_c).impact.combine().map(|c| c.draggable_id.as_str()),
        Some("C")
    );
    let after_c = step(&over_c, MoveDirection::Down);
    assert_eq!(destination(&drag(&after_c).impact), Some(("list", 2)));
    let back_on_c = step(&after_c, MoveDirection::Up);
    assert_eq!(
        drag(&back_on_c).impact.combine().map(|c| c.draggable_id.as_str()),
        Some("C")
    );
    let before_c = step(&back_on_c, MoveDirection::Up);
    assert_eq!(destination(&drag(&before_c).impact), Some(("list", 1)));
}

#[test]
fn keyboard_moves_across_to_the_closest_item() {
    let state = start(two_columns(), "B", MovementMode::Snap);
    let right = step(&state, MoveDirection::Right);
    let d = drag(&right);
    assert_eq!(destination(&d.impact), Some(("right", 1)));
    assert_eq!(displaced(&d.impact), ["Y"]);
    assert_eq!(d.current.client.border_box_center, Point::new(400.0, 75.0));

    let home = step(&right, MoveDirection::Left);
    assert_eq!(destination(&drag(&home).impact), Some(("left", 1)));
    assert!(drag(&home).impact.movement.displaced.is_empty());

    let nowhere = step(&home, MoveDirection::Left);
    assert_eq!(drag(&nowhere).impact, drag(&home).impact);
}

#[test]
fn keyboard_move_off_screen_requests_a_jump() {
    let state = start(scrolling_abcd(), "A", MovementMode::Snap);
    let one = step(&state, MoveDirection::Down);
    assert!(drag(&one).scroll_jump_request.is_none());

    let two = step(&one, MoveDirection::Down);
    let d = drag(&two);
    assert_eq!(destination(&d.impact), Some(("list", 2)));
    assert_eq!(d.scroll_jump_request, Some(Vec2::new(0.0, 50.0)));
    assert_eq!(d.force_should_animate, Some(false));
    assert_eq!(d.current.client.selection, drag(&one).current.client.selection);

    let jump = auto_scroll::jump_scroll(d).expect("jump");
    assert_eq!(
        jump.requests,
        [auto_scroll::ScrollRequest::Droppable {
            id: DroppableId::new("list"),
            change: Vec2::new(0.0, 50.0),
        }]
    );
    assert!(jump.move_to.is_none());

    let scrolled = transition(
        &two,
        Action::UpdateDroppableScroll {
            id: DroppableId::new("list"),
            new_scroll: Vec2::new(0.0, 50.0),
        },
    )
    .unwrap();
    let d = drag(&scrolled);
    assert_eq!(destination(&d.impact), Some(("list", 2)));
    assert_eq!(d.current.client.border_box_center, Point::new(100.0, 75.0));
}

#[test]
fn jump_beyond_every_scroll_moves_the_item() {
    let state = start(abcd(), "A", MovementMode::Snap);
    let mut d = drag(&state).clone();
    d.scroll_jump_request = Some(Vec2::new(0.0, 30.0));
    let jump = auto_scroll::jump_scroll(&d).expect("jump");
    assert!(jump.requests.is_empty());
    assert_eq!(jump.move_to, Some(Point::new(100.0, 55.0)));
}

#[test]
fn window_scroll_keeps_the_pointer_in_place() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let mut d = drag(&state).clone();
    d.viewport = d.viewport.with_max_scroll(Vec2::new(0.0, 500.0));
    let state = DragState::Dragging(d);
    let scrolled = transition(
        &state,
        Action::MoveByWindowScroll {
            new_scroll: Vec2::new(0.0, 100.0),
        },
    )
    .unwrap();
    let d = drag(&scrolled);
    assert_eq!(d.current.page.offset, Vec2::new(0.0, 100.0));
    assert_eq!(d.current.client.offset, Vec2::ZERO);
    assert_eq!(destination(&d.impact), Some(("list", 3)));
}

#[test]
fn window_scroll_is_tracked_when_auto_scroll_may_not_move_the_window() {
    let state = start_with(abcd(), "B", MovementMode::Fluid, false);
    assert!(!drag(&state).is_window_scroll_allowed);
    let scrolled = scroll_window(&with_scrollable_window(&state), 100.0);
    let d = drag(&scrolled);
    assert_eq!(d.viewport.scroll.current, Vec2::new(0.0, 100.0));
    assert_eq!(d.current.page.offset, Vec2::new(0.0, 100.0));
    assert_eq!(destination(&d.impact), Some(("list", 3)));
    assert!(!d.is_window_scroll_allowed);
}

#[test]
fn fixed_list_turns_off_window_auto_scroll() {
    assert!(!drag(&start(fixed_abcd(), "B", MovementMode::Fluid)).is_window_scroll_allowed);
    assert!(drag(&start(abcd(), "B", MovementMode::Fluid)).is_window_scroll_allowed);
}

#[test]
fn fixed_list_stays_under_the_pointer_when_the_window_scrolls() {
    let state = with_scrollable_window(&start(fixed_abcd(), "B", MovementMode::Fluid));
    let scrolled = scroll_window(&state, 300.0);
    let d = drag(&scrolled);
    assert_eq!(d.current.page.border_box_center, Point::new(100.0, 375.0));
    assert_eq!(destination(&d.impact), Some(("list", 1)));
    assert!(d.impact.movement.displaced.is_empty());

    // Moving down a slot on screen still reorders against the fixed boxes.
    let moved = move_to(&scrolled, 100.0, 150.0);
    assert_eq!(destination(&drag(&moved).impact), Some(("list", 2)));
    assert_eq!(displaced(&drag(&moved).impact), ["C"]);
    assert!(drag(&moved).impact.movement.displaced[0].is_visible);

    // The item never left its slot on screen, so it drops without an animation.
    let dropped = transition(&scrolled, Action::Drop { reason: DropReason::Drop }).unwrap();
    let completed = dropped.completed().expect("completed");
    assert_eq!(completed.result.destination.as_ref().map(|d| d.index), Some(1));

    // A list that scrolls with the page is left behind by the same scroll.
    let state = with_scrollable_window(&start(abcd(), "B", MovementMode::Fluid));
    assert_eq!(destination(&drag(&scroll_window(&state, 300.0)).impact), None);
}

#[test]
fn only_movement_actions_reach_an_idle_state_unchanged() {
    let idle = DragState::default();
    let id = DroppableId::new("list");
    let movements = [
        Action::Move {
            client: Point::new(1.0, 1.0),
        },
        Action::MoveByWindowScroll {
            new_scroll: Vec2::new(0.0, 10.0),
        },
        Action::UpdateViewportMaxScroll {
            max_scroll: Vec2::new(0.0, 10.0),
        },
        Action::UpdateDroppableScroll {
            id: id.clone(),
            new_scroll: Vec2::new(0.0, 10.0),
        },
        Action::UpdateDroppableIsEnabled {
            id: id.clone(),
            is_enabled: false,
        },
        Action::UpdateDroppableIsCombineEnabled {
            id,
            is_combine_enabled: true,
        },
        Action::MoveInDirection(MoveDirection::Down),
    ];
    for action in movements {
        assert!(action.is_movement(), "{}", action.kind());
        assert!(!action.stops_auto_scroll(), "{}", action.kind());
        assert_eq!(transition(&idle, action).unwrap(), idle);
    }
    for action in [Action::CollectionStarting, Action::Flush, Action::DropComplete] {
        assert!(!action.is_movement(), "{}", action.kind());
    }
    assert!(matches!(
        transition(&idle, Action::DropAnimationFinished),
        Err(TransitionError::InvalidPhase { .. })
    ));
}

#[test]
fn drop_in_place_completes_without_animation() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let dropped = transition(&state, Action::Drop { reason: DropReason::Drop }).unwrap();
    let completed = dropped.completed().expect("completed");
    assert_eq!(completed.result.reason, DropReason::Drop);
    assert_eq!(
        completed.result.destination,
        Some(DraggableLocation {
            droppable_id: DroppableId::new("list"),
            index: 1,
        })
    );
}

#[test]
fn drop_elsewhere_animates_into_the_new_slot() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let moved = move_to(&state, 100.0, 140.0);
    let dropped = transition(&moved, Action::Drop { reason: DropReason::Drop }).unwrap();
    let DragState::DropAnimating(pending) = &dropped else {
        panic!("expected drop animation, got {:?}", dropped.phase());
    };
    assert_eq!(pending.new_home_client_offset, Vec2::new(0.0, 50.0));
    assert_eq!(pending.completed.result.destination.as_ref().map(|d| d.index), Some(2));
    assert!(pending.drop_duration_ms >= 330 && pending.drop_duration_ms <= 550);

    let finished = transition(&dropped, Action::DropAnimationFinished).unwrap();
    assert_eq!(finished.completed(), Some(&pending.completed));
}

#[test]
fn cancel_returns_home_with_no_destination() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let moved = move_to(&state, 100.0, 175.0);
    let cancelled = transition(&moved, Action::Drop { reason: DropReason::Cancel }).unwrap();
    let DragState::DropAnimating(pending) = &cancelled else {
        panic!("expected drop animation");
    };
    assert_eq!(pending.completed.result.reason, DropReason::Cancel);
    assert!(pending.completed.result.destination.is_none());
    assert!(pending.completed.impact.movement.displaced.is_empty());
    assert_eq!(pending.new_home_client_offset, Vec2::ZERO);
}

#[test]
fn combine_drop_clears_displacement_and_animates() {
    let dims = abcd();
    let id = DroppableId::new("list");
    let combining = dims.droppable(&id).unwrap().clone().with_combine_enabled(true);
    let state = start(dims.with_droppable(combining), "B", MovementMode::Fluid);
    let over_c = move_to(&state, 100.0, 125.0);
    let dropped = transition(&over_c, Action::Drop { reason: DropReason::Drop }).unwrap();
    let DragState::DropAnimating(pending) = &dropped else {
        panic!("expected drop animation");
    };
    let result = &pending.completed.result;
    assert!(result.destination.is_none());
    assert_eq!(result.combine.as_ref().map(|c| c.draggable_id.as_str()), Some("C"));
    assert!(pending.completed.impact.movement.displaced.is_empty());
}

#[test]
fn drop_duration_scales_with_distance() {
    let options = DropAnimationOptions::default();
    let origin = Vec2::ZERO;
    assert_eq!(drop_duration_ms(origin, origin, DropReason::Drop, &options), 330);
    assert_eq!(drop_duration_ms(origin, Vec2::new(0.0, 2000.0), DropReason::Drop, &options), 550);
    assert_eq!(drop_duration_ms(origin, Vec2::new(0.0, 750.0), DropReason::Drop, &options), 440);
    assert_eq!(drop_duration_ms(origin, Vec2::new(0.0, 750.0), DropReason::Cancel, &options), 260);
}

#[test]
fn drop_while_collecting_waits_for_publish() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let moved = move_to(&state, 100.0, 140.0);
    let collecting = transition(&moved, Action::CollectionStarting).unwrap();
    assert_eq!(collecting.phase(), Phase::Collecting);

    let pending = transition(&collecting, Action::Drop { reason: DropReason::Drop }).unwrap();
    assert_eq!(pending.phase(), Phase::DropPending);
    assert_eq!(
        transition(&pending, Action::Drop { reason: DropReason::Drop }),
        Err(TransitionError::DropAlreadyPending)
    );

    let published =
        transition(&pending, Action::PublishWhileDragging(Published::default())).unwrap();
    let DragState::DropPending(ready) = &published else {
        panic!("expected drop pending");
    };
    assert!(!ready.is_waiting);
    assert_eq!(ready.reason, DropReason::Drop);

    let dropped = transition(&published, Action::Drop { reason: DropReason::Cancel }).unwrap();
    let DragState::DropAnimating(animating) = &dropped else {
        panic!("expected drop animation");
    };
    // The pending reason wins over the replayed one.
    assert_eq!(animating.completed.result.reason, DropReason::Drop);
}

#[test]
fn collecting_freezes_the_impact() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let collecting = transition(&state, Action::CollectionStarting).unwrap();
    let moved = move_to(&collecting, 100.0, 175.0);
    let d = drag(&moved);
    assert_eq!(d.impact, drag(&state).impact);
    assert_eq!(d.current.client.selection, Point::new(100.0, 175.0));

    let published = transition(&moved, Action::PublishWhileDragging(Published::default())).unwrap();
    assert_eq!(published.phase(), Phase::Dragging);
    assert_eq!(destination(&drag(&published).impact), Some(("list", 3)));
}

#[test]
fn publish_adds_and_removes_items() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let collecting = transition(&state, Action::CollectionStarting).unwrap();
    let published = transition(
        &collecting,
        Action::PublishWhileDragging(Published {
            additions: vec![item("E", 4, "list", Rect::new(0.0, 200.0, 200.0, 250.0))],
            removals: vec![DraggableId::new("A"), DraggableId::new("B")],
            modified: Vec::new(),
        }),
    )
    .unwrap();
    let d = drag(&published);
    assert!(d.dimensions.draggable(&DraggableId::new("E")).is_some());
    assert!(d.dimensions.draggable(&DraggableId::new("A")).is_none());
    assert!(d.draggable().is_some(), "the dragged item is never removed");
}

#[test]
fn index_gaps_and_duplicates_are_reported() {
    let mut draggables = column("list", &["A", "B", "C"], 0.0, 50.0);
    draggables.push(item("D", 5, "list", Rect::new(0.0, 150.0, 200.0, 200.0)));
    draggables.push(item("E", 1, "list", Rect::new(0.0, 200.0, 200.0, 250.0)));
    let dims = DimensionMap::new(
        draggables,
        [list("list", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 250.0))],
    );
    let issues = check_indices(&dims);
    assert!(issues.contains(&IndexIssue::Duplicate {
        droppable_id: DroppableId::new("list"),
        index: 1,
    }));
    assert!(issues.contains(&IndexIssue::Gap {
        droppable_id: DroppableId::new("list"),
        expected: 3,
        found: 5,
    }));
    assert!(check_indices(&abcd()).is_empty());
}

#[test]
fn flush_synthesizes_a_cancel() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let flushed = transition(&state, Action::Flush).unwrap();
    let DragState::Idle(idle) = &flushed else {
        panic!("expected idle");
    };
    assert!(idle.should_flush);
    let completed = idle.completed.as_ref().expect("cancel result");
    assert_eq!(completed.result.reason, DropReason::Cancel);
    assert!(completed.result.destination.is_none());
}

#[test]
fn second_lift_is_rejected_without_touching_state() {
    let state = start(abcd(), "B", MovementMode::Fluid);
    let before = state.clone();
    let err = transition(
        &state,
        Action::Lift {
            draggable_id: DraggableId::new("C"),
            client_selection: Point::ZERO,
            movement_mode: MovementMode::Fluid,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        TransitionError::InvalidPhase {
            action: ActionKind::Lift,
            phase: Phase::Dragging,
        }
    );
    assert_eq!(state, before);
}

#[test]
fn initial_publish_must_match_the_lift() {
    let preparing = transition(
        &DragState::default(),
        Action::Lift {
            draggable_id: DraggableId::new("A"),
            client_selection: Point::new(100.0, 25.0),
            movement_mode: MovementMode::Fluid,
        },
    )
    .unwrap();
    let dims = abcd();
    let err = transition(
        &preparing,
        Action::InitialPublish(InitialPublish {
            critical: critical_for(&dims, "B"),
            dimensions: dims,
            viewport: viewport(),
            is_window_scroll_allowed: true,
        }),
    )
    .unwrap_err();
    assert!(matches!(err, TransitionError::CriticalMismatch { .. }));
}

fn states_by_phase() -> Vec<DragState> {
    let idle = DragState::default();
    let preparing = transition(
        &idle,
        Action::Lift {
            draggable_id: DraggableId::new("B"),
            client_selection: Point::new(100.0, 75.0),
            movement_mode: MovementMode::Fluid,
        },
    )
    .unwrap();
    let dragging = start(abcd(), "B", MovementMode::Fluid);
    let collecting = transition(&dragging, Action::CollectionStarting).unwrap();
    let pending = transition(&collecting, Action::Drop { reason: DropReason::Drop }).unwrap();
    let moved = move_to(&dragging, 100.0, 175.0);
    let animating = transition(&moved, Action::Drop { reason: DropReason::Drop }).unwrap();
    vec![idle, preparing, dragging, collecting, pending, animating]
}

fn every_action() -> Vec<Action> {
    let dims = abcd();
    vec![
        Action::Lift {
            draggable_id: DraggableId::new("B"),
            client_selection: Point::new(100.0, 75.0),
            movement_mode: MovementMode::Fluid,
        },
        Action::InitialPublish(InitialPublish {
            critical: critical_for(&dims, "B"),
            dimensions: dims,
            viewport: viewport(),
            is_window_scroll_allowed: true,
        }),
        Action::CollectionStarting,
        Action::PublishWhileDragging(Published::default()),
        Action::Move {
            client: Point::new(100.0, 90.0),
        },
        Action::MoveByWindowScroll {
            new_scroll: Vec2::new(0.0, 10.0),
        },
        Action::UpdateViewportMaxScroll {
            max_scroll: Vec2::new(0.0, 10.0),
        },
        Action::UpdateDroppableScroll {
            id: DroppableId::new("list"),
            new_scroll: Vec2::new(0.0, 10.0),
        },
        Action::UpdateDroppableIsEnabled {
            id: DroppableId::new("list"),
            is_enabled: false,
        },
        Action::UpdateDroppableIsCombineEnabled {
            id: DroppableId::new("list"),
            is_combine_enabled: true,
        },
        Action::MoveInDirection(MoveDirection::Down),
        Action::Drop {
            reason: DropReason::Drop,
        },
        Action::DropAnimationFinished,
        Action::DropComplete,
        Action::Flush,
    ]
}

fn is_contract_violation(phase: Phase, action: ActionKind) -> bool {
    use ActionKind as A;
    match (phase, action) {
        (_, A::Flush) => false,
        (Phase::Idle, A::Lift) => false,
        (_, A::Lift) => true,
        (Phase::Preparing, A::InitialPublish) => false,
        (_, A::InitialPublish) => true,
        (Phase::Preparing, A::CollectionStarting) => true,
        (_, A::CollectionStarting) => false,
        (Phase::Collecting | Phase::DropPending, A::PublishWhileDragging) => false,
        (_, A::PublishWhileDragging) => true,
        (Phase::DropPending | Phase::DropAnimating, A::Drop) => true,
        (_, A::Drop) => false,
        (Phase::DropAnimating, A::DropAnimationFinished | A::DropComplete) => false,
        (_, A::DropAnimationFinished | A::DropComplete) => true,
        (Phase::Preparing, _) => true,
        _ => false,
    }
}

#[test]
fn transition_is_total_over_phases_and_actions() {
    for state in states_by_phase() {
        for action in every_action() {
            let phase = state.phase();
            let kind = action.kind();
            let result = transition(&state, action);
            assert_eq!(
                result.is_err(),
                is_contract_violation(phase, kind),
                "{phase} + {kind}: {result:?}"
            );
        }
    }
}

#[test]
fn scroll_speed_ramps_towards_the_edge() {
    let options = AutoScrollOptions::default();
    let container = Rect::new(0.0, 0.0, 400.0, 400.0);
    let subject = Rect::new(0.0, 0.0, 50.0, 50.0);
    let undamped = auto_scroll::Dampening {
        run_time_ms: 0,
        enabled: false,
    };
    let speed = |y: f64| {
        auto_scroll::scroll_speed(container, subject, Point::new(200.0, y), undamped, &options)
            .map_or(0.0, |v| v.y)
    };
    assert_eq!(speed(200.0), 0.0);
    assert_eq!(speed(300.0), 1.0);
    assert!(speed(340.0) > speed(320.0));
    assert_eq!(speed(390.0), 28.0);
    assert_eq!(speed(10.0), -28.0);
}

#[test]
fn time_dampening_holds_speed_down_early() {
    let options = AutoScrollOptions::default();
    let container = Rect::new(0.0, 0.0, 400.0, 400.0);
    let subject = Rect::new(0.0, 0.0, 50.0, 50.0);
    let at = |run_time_ms: u64| {
        let dampening = auto_scroll::Dampening {
            run_time_ms,
            enabled: true,
        };
        auto_scroll::scroll_speed(container, subject, Point::new(200.0, 395.0), dampening, &options)
            .map_or(0.0, |v| v.y)
    };
    assert_eq!(at(100), 1.0);
    assert!(at(800) > 1.0 && at(800) < 28.0);
    assert_eq!(at(1500), 28.0);
}

#[test]
fn oversized_items_do_not_scroll_on_that_axis() {
    let options = AutoScrollOptions::default();
    let container = Rect::new(0.0, 0.0, 400.0, 400.0);
    let tall = Rect::new(0.0, 0.0, 50.0, 500.0);
    let undamped = auto_scroll::Dampening {
        run_time_ms: 0,
        enabled: false,
    };
    let center = Point::new(200.0, 395.0);
    assert!(auto_scroll::scroll_speed(container, tall, center, undamped, &options).is_none());
}

#[test]
fn partial_scroll_checks_each_direction() {
    let max = Vec2::new(0.0, 100.0);
    assert!(auto_scroll::can_partially_scroll(Vec2::ZERO, max, Vec2::new(0.0, 30.0)));
    assert!(!auto_scroll::can_partially_scroll(Vec2::ZERO, max, Vec2::new(0.0, -30.0)));
    assert!(!auto_scroll::can_partially_scroll(Vec2::new(0.0, 100.0), max, Vec2::new(0.0, 5.0)));
    assert_eq!(
        auto_scroll::overlap(Vec2::new(0.0, 90.0), max, Vec2::new(0.0, 30.0)),
        Some(Vec2::new(0.0, 20.0))
    );
}

#[test]
fn fluid_scroller_prefers_the_list_under_the_item() {
    let options = AutoScrollOptions::default();
    let state = start(scrolling_abcd(), "A", MovementMode::Fluid);
    let mut scroller = auto_scroll::FluidScroller::new();
    assert!(!scroller.start(drag(&state), 0, &options));

    let near_bottom = move_to(&state, 100.0, 95.0);
    let request = scroller.scroll(drag(&near_bottom), 16, &options);
    assert_eq!(
        request,
        Some(auto_scroll::ScrollRequest::Droppable {
            id: DroppableId::new("list"),
            change: Vec2::new(0.0, 28.0),
        })
    );

    scroller.stop();
    assert!(scroller.scroll(drag(&near_bottom), 32, &options).is_none());
}

#[test]
fn fluid_scroller_is_damped_when_lifted_in_a_scroll_zone() {
    let options = AutoScrollOptions::default();
    let dims = DimensionMap::new(
        column("list", &["A", "B", "C", "D"], 0.0, 50.0),
        [list("list", Axis::Vertical, Rect::new(0.0, 0.0, 200.0, 200.0))],
    );
    let mut state = start(dims, "D", MovementMode::Fluid);
    let mut d = drag(&state).clone();
    d.viewport = Viewport::new(Size::new(200.0, 200.0), Vec2::ZERO, Vec2::new(0.0, 500.0));
    state = DragState::Dragging(d);

    let mut scroller = auto_scroll::FluidScroller::new();
    assert!(scroller.start(drag(&state), 1_000, &options));
    let early = scroller.scroll(drag(&state), 1_100, &options).expect("scroll");
    assert_eq!(early, auto_scroll::ScrollRequest::Window { change: Vec2::new(0.0, 1.0) });
    let late = scroller.scroll(drag(&state), 3_000, &options).expect("scroll");
    assert!(late.change().y > 1.0);
}
