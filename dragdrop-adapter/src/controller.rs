use dragdrop::auto_scroll::{FluidScroller, ScrollRequest, jump_scroll};
use dragdrop::kurbo::{Point, Vec2};
use dragdrop::{
    Action, CompletedDrag, Critical, DimensionMap, DragOptions, DragStart, DragState,
    DraggableDescriptor, DraggableId, DropReason, DroppableId, DroppableScroll, InitialPublish,
    MoveDirection, MovementMode, Phase, Published, TransitionError, transition_with,
};

use crate::publisher::Publisher;
use crate::registry::Registry;
use crate::responders::{BeforeCapture, Responders};
use crate::scheduler::{Due, TaskKind, TaskQueue};
use crate::staging::Staging;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("a drag is already in progress")]
    DragInProgress,
    #[error("draggable {0} is not registered")]
    UnknownDraggable(DraggableId),
    #[error("droppable {0} is not registered")]
    UnknownDroppable(DroppableId),
}

/// Handle returned by [`DragController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&DragState)>;

/// Owns the single live drag and drives it.
///
/// The controller holds no UI objects. Adapters drive it by calling:
/// - `lift` / `move_to` / `move_in_direction` / `drop` for user input
/// - `on_window_scroll` / `on_droppable_scroll` when the UI reports a scroll
/// - `on_draggable_added` / `on_draggable_removed` when items mount or unmount mid-drag
/// - `tick(now_ms)` every frame, which runs deferred work (collection, edge scrolling,
///   responder delivery, the drop-settle timeout)
///
/// Failed calls leave the drag untouched and report a [`ControllerError`].
pub struct DragController<R> {
    registry: R,
    options: DragOptions,
    state: DragState,
    publisher: Publisher,
    tasks: TaskQueue,
    fluid: FluidScroller,
    staging: Staging,
    watching: Vec<DroppableId>,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl<R> core::fmt::Debug for DragController<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragController")
            .field("phase", &self.state.phase())
            .field("tasks", &self.tasks)
            .field("staging", &self.staging)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<R: Registry> DragController<R> {
    pub fn new(registry: R, responders: Responders) -> Self {
        Self {
            registry,
            options: DragOptions::default(),
            state: DragState::default(),
            publisher: Publisher::new(responders),
            tasks: TaskQueue::new(),
            fluid: FluidScroller::new(),
            staging: Staging::new(),
            watching: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_options(mut self, options: DragOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Whether `on_drag_start` has gone out for a drag whose `on_drag_end` has not.
    ///
    /// Stays true through the drop animation.
    pub fn is_drag_live(&self) -> bool {
        self.publisher.is_live()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    pub fn responders_mut(&mut self) -> &mut Responders {
        self.publisher.responders_mut()
    }

    /// Calls `listener` with the new state on every phase change.
    pub fn subscribe(&mut self, listener: impl FnMut(&DragState) + 'static) -> Subscription {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        let listener: Listener = Box::new(listener);
        self.listeners.push((subscription, listener));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != subscription);
        before != self.listeners.len()
    }

    /// Picks up `draggable_id` and measures every participant of its type.
    ///
    /// A drop that is still animating is completed first. Any other live drag is an error.
    pub fn lift(
        &mut self,
        draggable_id: DraggableId,
        client_selection: Point,
        mode: MovementMode,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        if matches!(self.state, DragState::DropAnimating(_)) {
            self.dispatch(Action::DropComplete, now_ms)?;
        }
        if !self.state.is_idle() {
            return Err(ControllerError::DragInProgress);
        }
        let descriptor = self
            .registry
            .draggables()
            .into_iter()
            .find(|d| d.id == draggable_id)
            .ok_or_else(|| ControllerError::UnknownDraggable(draggable_id.clone()))?;

        self.publisher.before_capture(&BeforeCapture {
            draggable_id: draggable_id.clone(),
            mode,
        });
        self.dispatch(
            Action::Lift {
                draggable_id,
                client_selection,
                movement_mode: mode,
            },
            now_ms,
        )?;

        let publish = match self.collect_initial(&descriptor) {
            Ok(publish) => publish,
            Err(err) => {
                self.flush();
                return Err(err);
            }
        };
        let critical = publish.critical.clone();
        let scrollable: Vec<DroppableId> = publish
            .dimensions
            .droppables()
            .filter(|d| d.frame.is_some())
            .map(|d| d.id().clone())
            .collect();
        self.publisher
            .before_start(&DragStart::from_critical(&critical, mode));
        if let Err(err) = self.dispatch(Action::InitialPublish(publish), now_ms) {
            self.flush();
            return Err(err);
        }

        self.publisher.start(&critical, mode);
        self.tasks.schedule(TaskKind::FlushResponders, Due::NextFrame);
        for id in scrollable {
            self.registry.watch_scroll(&id);
            self.watching.push(id);
        }
        if mode == MovementMode::Fluid {
            if let Some(drag) = self.state.dragging() {
                self.fluid.start(drag, now_ms, &self.options.auto_scroll);
            }
            self.tasks.schedule(TaskKind::FluidScroll, Due::NextFrame);
        }
        Ok(())
    }

    pub fn move_to(&mut self, client: Point, now_ms: u64) -> Result<(), ControllerError> {
        self.dispatch(Action::Move { client }, now_ms)
    }

    /// One keyboard step. A step that lands off screen scrolls first, then moves the item by
    /// whatever could not be scrolled.
    pub fn move_in_direction(
        &mut self,
        direction: MoveDirection,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        self.dispatch(Action::MoveInDirection(direction), now_ms)?;
        let jump = match &self.state {
            DragState::Dragging(drag) => jump_scroll(drag),
            _ => None,
        };
        let Some(jump) = jump else {
            return Ok(());
        };
        for request in jump.requests {
            self.perform_scroll(request, now_ms)?;
        }
        if let Some(client) = jump.move_to {
            self.dispatch(Action::Move { client }, now_ms)?;
        }
        Ok(())
    }

    pub fn on_window_scroll(
        &mut self,
        new_scroll: Vec2,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        self.dispatch(Action::MoveByWindowScroll { new_scroll }, now_ms)
    }

    pub fn on_viewport_max_scroll(
        &mut self,
        max_scroll: Vec2,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        self.dispatch(Action::UpdateViewportMaxScroll { max_scroll }, now_ms)
    }

    pub fn on_droppable_scroll(
        &mut self,
        id: DroppableId,
        new_scroll: Vec2,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        self.dispatch(Action::UpdateDroppableScroll { id, new_scroll }, now_ms)
    }

    pub fn set_droppable_enabled(
        &mut self,
        id: DroppableId,
        is_enabled: bool,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        self.dispatch(Action::UpdateDroppableIsEnabled { id, is_enabled }, now_ms)
    }

    pub fn set_droppable_combine_enabled(
        &mut self,
        id: DroppableId,
        is_combine_enabled: bool,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        self.dispatch(
            Action::UpdateDroppableIsCombineEnabled {
                id,
                is_combine_enabled,
            },
            now_ms,
        )
    }

    /// A draggable mounted while dragging. Items of another type are ignored.
    pub fn on_draggable_added(&mut self, descriptor: DraggableDescriptor) {
        if self.stage_if_relevant(&descriptor) {
            self.staging.add(descriptor.id, descriptor.droppable_id);
        }
    }

    /// A draggable unmounted while dragging.
    pub fn on_draggable_removed(&mut self, descriptor: DraggableDescriptor) {
        if self.stage_if_relevant(&descriptor) {
            self.staging.remove(descriptor.id, descriptor.droppable_id);
        }
    }

    fn stage_if_relevant(&mut self, descriptor: &DraggableDescriptor) -> bool {
        let Some(critical) = self.state.dragging().map(|d| &d.critical) else {
            return false;
        };
        if critical.draggable.item_type != descriptor.item_type {
            return false;
        }
        self.tasks.schedule(TaskKind::Collect, Due::NextFrame);
        true
    }

    pub fn drop(&mut self, reason: DropReason, now_ms: u64) -> Result<(), ControllerError> {
        self.dispatch(Action::Drop { reason }, now_ms)
    }

    /// The host finished animating the dropped item into place.
    pub fn drop_animation_finished(&mut self, now_ms: u64) -> Result<(), ControllerError> {
        self.dispatch(Action::DropAnimationFinished, now_ms)
    }

    /// Tears down whatever is live and returns to idle. A drag in progress ends as a
    /// cancellation.
    pub fn flush(&mut self) {
        if let Err(_err) = self.dispatch(Action::Flush, 0) {
            dwarn!(err = %_err, "flush failed");
        }
        self.tasks.clear();
    }

    /// Runs every task due at `now_ms`. Tasks scheduled while ticking wait for the next tick.
    pub fn tick(&mut self, now_ms: u64) -> Result<(), ControllerError> {
        self.tasks.advance_frame();
        while let Some(kind) = self.tasks.pop_due(now_ms) {
            dtrace!(task = kind.as_str(), now_ms, "running task");
            self.run(kind, now_ms)?;
        }
        Ok(())
    }

    fn run(&mut self, kind: TaskKind, now_ms: u64) -> Result<(), ControllerError> {
        match kind {
            TaskKind::Collect => self.start_collection(now_ms),
            TaskKind::Publish => self.publish(now_ms),
            TaskKind::FluidScroll => self.fluid_scroll(now_ms),
            TaskKind::FlushResponders => {
                self.publisher.flush();
                Ok(())
            }
            TaskKind::SettleDrop => {
                if !matches!(self.state, DragState::DropAnimating(_)) {
                    return Ok(());
                }
                dwarn!("drop animation end was not reported in time; completing the drop");
                self.dispatch(Action::DropAnimationFinished, now_ms)
            }
        }
    }

    fn start_collection(&mut self, now_ms: u64) -> Result<(), ControllerError> {
        // A collection already in flight picks up whatever is staged.
        if self.state.phase() != Phase::Dragging || self.staging.is_empty() {
            return Ok(());
        }
        self.dispatch(Action::CollectionStarting, now_ms)?;
        self.tasks.schedule(TaskKind::Publish, Due::NextFrame);
        Ok(())
    }

    fn publish(&mut self, now_ms: u64) -> Result<(), ControllerError> {
        let Some(window_scroll) = self
            .state
            .dragging()
            .map(|d| d.viewport.scroll.current)
        else {
            return Ok(());
        };
        let staged = self.staging.take();
        let mut additions = Vec::with_capacity(staged.additions.len());
        for id in &staged.additions {
            match self.registry.draggable_dimension(id, window_scroll) {
                Some(dimension) => additions.push(dimension),
                None => {
                    dwarn!(draggable_id = %id, "added draggable could not be measured; skipping");
                }
            }
        }
        let modified = staged
            .modified
            .iter()
            .filter_map(|id| {
                self.registry
                    .droppable_scroll(id)
                    .map(|scroll| DroppableScroll {
                        droppable_id: id.clone(),
                        scroll,
                    })
            })
            .collect();
        let published = Published {
            additions,
            removals: staged.removals,
            modified,
        };
        self.dispatch(Action::PublishWhileDragging(published), now_ms)
    }

    fn fluid_scroll(&mut self, now_ms: u64) -> Result<(), ControllerError> {
        let DragState::Dragging(drag) = &self.state else {
            return Ok(());
        };
        let Some(request) = self.fluid.scroll(drag, now_ms, &self.options.auto_scroll) else {
            return Ok(());
        };
        self.perform_scroll(request, now_ms)
    }

    fn perform_scroll(
        &mut self,
        request: ScrollRequest,
        now_ms: u64,
    ) -> Result<(), ControllerError> {
        match request {
            ScrollRequest::Droppable { id, change } => {
                let new_scroll = self.registry.scroll_droppable(&id, change);
                self.dispatch(Action::UpdateDroppableScroll { id, new_scroll }, now_ms)
            }
            ScrollRequest::Window { change } => {
                let new_scroll = self.registry.scroll_window(change);
                self.dispatch(Action::MoveByWindowScroll { new_scroll }, now_ms)
            }
        }
    }

    fn collect_initial(
        &mut self,
        descriptor: &DraggableDescriptor,
    ) -> Result<InitialPublish, ControllerError> {
        let viewport = self.registry.viewport();
        let window_scroll = viewport.scroll.current;
        let item_type = &descriptor.item_type;

        let mut droppables = Vec::new();
        let mut home = None;
        for candidate in self.registry.droppables() {
            if &candidate.item_type != item_type {
                continue;
            }
            let Some(dimension) = self.registry.droppable_dimension(&candidate.id, window_scroll)
            else {
                dwarn!(droppable_id = %candidate.id, "droppable could not be measured; skipping");
                continue;
            };
            if candidate.id == descriptor.droppable_id {
                home = Some(candidate);
            }
            droppables.push(dimension);
        }
        let home =
            home.ok_or_else(|| ControllerError::UnknownDroppable(descriptor.droppable_id.clone()))?;

        let mut draggables = Vec::new();
        for candidate in self.registry.draggables() {
            if &candidate.item_type != item_type {
                continue;
            }
            match self.registry.draggable_dimension(&candidate.id, window_scroll) {
                Some(dimension) => draggables.push(dimension),
                None => {
                    dwarn!(
                        draggable_id = %candidate.id,
                        "draggable could not be measured; skipping"
                    );
                }
            }
        }
        if !draggables.iter().any(|d| d.id() == &descriptor.id) {
            return Err(ControllerError::UnknownDraggable(descriptor.id.clone()));
        }

        Ok(InitialPublish {
            critical: Critical {
                draggable: descriptor.clone(),
                droppable: home,
            },
            dimensions: DimensionMap::new(draggables, droppables),
            viewport,
            is_window_scroll_allowed: self.registry.is_window_scroll_allowed(),
        })
    }

    /// Applies `action`, then runs the follow-up work its outcome calls for.
    fn dispatch(&mut self, action: Action, now_ms: u64) -> Result<(), ControllerError> {
        // Scroll ticks are cancelled before the action is applied so none can fire late.
        if action.stops_auto_scroll() {
            self.tasks.cancel(TaskKind::FluidScroll);
            if !matches!(action, Action::CollectionStarting) {
                self.fluid.stop();
            }
        }
        let previous = self.state.phase();
        self.state = transition_with(&self.state, action, &self.options)?;
        self.after_transition(previous, now_ms)
    }

    fn after_transition(&mut self, previous: Phase, now_ms: u64) -> Result<(), ControllerError> {
        let phase = self.state.phase();
        if phase != previous {
            ddebug!(from = previous.as_str(), to = phase.as_str(), "phase changed");
            for (_, listener) in self.listeners.iter_mut() {
                listener(&self.state);
            }
        }
        match &self.state {
            DragState::Dragging(drag) => {
                self.publisher.update(&drag.critical, &drag.impact);
                if drag.movement_mode == MovementMode::Fluid && self.fluid.is_active() {
                    self.tasks.schedule(TaskKind::FluidScroll, Due::NextFrame);
                }
            }
            DragState::DropPending(pending) if !pending.is_waiting => {
                let reason = pending.reason;
                return self.dispatch(Action::Drop { reason }, now_ms);
            }
            DragState::DropAnimating(pending) if previous != Phase::DropAnimating => {
                let at = now_ms.saturating_add(pending.drop_duration_ms);
                self.tasks.schedule(TaskKind::SettleDrop, Due::At(at));
            }
            DragState::Idle(idle) if previous != Phase::Idle => {
                let completed = idle.completed.clone();
                self.finish(completed.as_ref());
            }
            _ => {}
        }
        if self.publisher.has_pending() {
            self.tasks.schedule(TaskKind::FlushResponders, Due::NextFrame);
        }
        Ok(())
    }

    /// Back to idle: nothing stays scheduled or watched, and the drag end goes out.
    fn finish(&mut self, completed: Option<&CompletedDrag>) {
        self.tasks.clear();
        self.fluid.stop();
        self.staging.clear();
        match completed {
            Some(completed) => self.publisher.end(&completed.result),
            None => self.publisher.abort(),
        }
        for id in self.watching.drain(..) {
            self.registry.unwatch_scroll(&id);
        }
    }
}
